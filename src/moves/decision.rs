//! Operator decision gate for group moves.
//!
//! When a grouped student is moved away from groupmates in the same class,
//! the operator must choose between moving the whole group or moving the
//! student alone (which detaches it from the group). The choice is
//! supplied through a [`GroupMoveDecider`]; returning `None` abandons the
//! request with no mutation.

use serde::{Deserialize, Serialize};

use crate::models::{ClassId, StudentId};

/// The two permitted answers. There is no third option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroupMoveChoice {
    /// Move the student together with its groupmates in the source class.
    WholeGroup,
    /// Move only the student and clear its group.
    Alone,
}

/// What the operator is asked about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupMovePrompt {
    pub student: StudentId,
    pub student_name: String,
    pub group_id: String,
    pub from: ClassId,
    pub to: ClassId,
    /// Groupmates currently in `from`, excluding `student`.
    pub groupmates: Vec<StudentId>,
}

impl GroupMovePrompt {
    /// Operator-facing confirmation text.
    pub fn message(&self) -> String {
        format!(
            "[그룹 이동 확인]\n\
             이 학생은 '{}' 그룹 소속입니다.\n\
             함께 있는 {}명의 친구들도 같이 이동할까요?\n\n\
             [확인] : 예, 그룹 전체를 함께 이동합니다.\n\
             [취소] : 아니요, 이 학생만 강제로 이동합니다. (그룹 해제)",
            self.group_id,
            self.groupmates.len()
        )
    }
}

/// Source of operator decisions.
///
/// Implemented for any `FnMut(&GroupMovePrompt) -> Option<GroupMoveChoice>`,
/// so a closure can be passed directly.
pub trait GroupMoveDecider {
    /// Returns the operator's choice, or `None` if the prompt was abandoned.
    fn decide(&mut self, prompt: &GroupMovePrompt) -> Option<GroupMoveChoice>;
}

impl<F> GroupMoveDecider for F
where
    F: FnMut(&GroupMovePrompt) -> Option<GroupMoveChoice>,
{
    fn decide(&mut self, prompt: &GroupMovePrompt) -> Option<GroupMoveChoice> {
        self(prompt)
    }
}

/// Decider that always gives the same answer.
#[derive(Debug, Clone, Copy)]
pub struct FixedChoice(pub Option<GroupMoveChoice>);

impl GroupMoveDecider for FixedChoice {
    fn decide(&mut self, _prompt: &GroupMovePrompt) -> Option<GroupMoveChoice> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompt() -> GroupMovePrompt {
        GroupMovePrompt {
            student: StudentId(0),
            student_name: "A".into(),
            group_id: "G1".into(),
            from: 1,
            to: 2,
            groupmates: vec![StudentId(1), StudentId(2)],
        }
    }

    #[test]
    fn test_message_mentions_group_and_count() {
        let text = prompt().message();
        assert!(text.contains("'G1'"));
        assert!(text.contains("2명"));
    }

    #[test]
    fn test_closure_decider() {
        let mut asked = 0;
        let mut decider = |p: &GroupMovePrompt| {
            asked += 1;
            assert_eq!(p.to, 2);
            Some(GroupMoveChoice::Alone)
        };
        assert_eq!(decider.decide(&prompt()), Some(GroupMoveChoice::Alone));
        assert_eq!(asked, 1);
    }

    #[test]
    fn test_fixed_choice() {
        let mut d = FixedChoice(None);
        assert_eq!(d.decide(&prompt()), None);
    }
}
