use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Position in the hierarchy. Declaration order gives `Employee < Leader < Director`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum Role {
    #[sea_orm(num_value = 1)]
    Employee,
    #[sea_orm(num_value = 2)]
    Leader,
    #[sea_orm(num_value = 3)]
    Director,
}

impl Role {
    /// Whether `self` may be the manager of someone holding `subordinate`.
    /// Directors may be managed by Directors since nothing ranks above them.
    pub fn can_manage(self, subordinate: Role) -> bool {
        self > subordinate || (self == Role::Director && subordinate == Role::Director)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Role::Employee => "Employee",
            Role::Leader => "Leader",
            Role::Director => "Director",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::Role;

    #[test]
    fn ordering_follows_hierarchy() {
        assert!(Role::Employee < Role::Leader);
        assert!(Role::Leader < Role::Director);
    }

    #[test]
    fn stored_as_ordinal() {
        use sea_orm::ActiveEnum;
        assert_eq!(Role::Employee.to_value(), 1);
        assert_eq!(Role::Director.to_value(), 3);
        assert_eq!(Role::try_from_value(&2).unwrap(), Role::Leader);
        assert!(Role::try_from_value(&0).is_err());
    }

    #[test]
    fn manager_must_outrank_except_directors() {
        assert!(Role::Leader.can_manage(Role::Employee));
        assert!(Role::Director.can_manage(Role::Leader));
        assert!(Role::Director.can_manage(Role::Director));
        assert!(!Role::Leader.can_manage(Role::Leader));
        assert!(!Role::Employee.can_manage(Role::Employee));
        assert!(!Role::Leader.can_manage(Role::Director));
    }

    #[test]
    fn serializes_by_name() {
        assert_eq!(serde_json::to_string(&Role::Leader).unwrap(), "\"Leader\"");
        let r: Role = serde_json::from_str("\"Director\"").unwrap();
        assert_eq!(r, Role::Director);
    }
}
