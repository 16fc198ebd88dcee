use serde::{Deserialize, Serialize};

use super::repo::ProfileChanges;
use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub full_name: Option<String>,
    pub location: Option<String>,
    pub protein_goal: Option<i32>,
}

impl UpdateProfileRequest {
    pub fn validate(&self) -> Result<ProfileChanges<'_>, AppError> {
        if matches!(self.protein_goal, Some(goal) if goal < 0) {
            return Err(AppError::InvalidInput(
                "protein_goal must not be negative".into(),
            ));
        }
        Ok(ProfileChanges {
            full_name: self.full_name.as_deref(),
            location: self.location.as_deref(),
            protein_goal: self.protein_goal,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct UserStats {
    pub total_logs: i64,
    pub weekly_protein: f64,
    pub days_logged_this_week: i64,
    pub protein_goal: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_goal_is_rejected() {
        let req = UpdateProfileRequest {
            full_name: None,
            location: None,
            protein_goal: Some(-5),
        };
        assert!(matches!(req.validate(), Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn only_supplied_fields_become_changes() {
        let req = UpdateProfileRequest {
            full_name: None,
            location: Some("Oakland, CA".into()),
            protein_goal: Some(0),
        };
        let changes = req.validate().expect("valid");
        assert_eq!(changes.full_name, None);
        assert_eq!(changes.location, Some("Oakland, CA"));
        assert_eq!(changes.protein_goal, Some(0));
    }
}
