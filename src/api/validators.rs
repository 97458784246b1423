use crate::api::models::EditZoneRequest;
use crate::zones::{DistributionChange, ZoneEdit};

pub const MAX_ZONE_NAME_LEN: usize = 255;

pub fn validate_percentage(percentage: f64) -> bool {
    percentage.is_finite() && (0.0..=100.0).contains(&percentage)
}

pub fn validate_zone_name(name: &str) -> bool {
    name.chars().count() <= MAX_ZONE_NAME_LEN
}

/// Checks an edit request and turns it into the operation it describes.
pub fn parse_edit_request(req: EditZoneRequest) -> Result<ZoneEdit, String> {
    if !validate_zone_name(&req.name) {
        return Err(format!(
            "name must be at most {} characters",
            MAX_ZONE_NAME_LEN
        ));
    }

    let changes = req
        .distributions
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            if !validate_percentage(entry.percentage) {
                return Err(format!(
                    "distributions[{}].percentage must be between 0 and 100",
                    index
                ));
            }

            // Zero is never a stored key and counts as "no id".
            Ok(match entry.id.filter(|id| *id != 0) {
                Some(id) => DistributionChange::Update {
                    id,
                    percentage: entry.percentage,
                },
                None => DistributionChange::Create {
                    percentage: entry.percentage,
                },
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ZoneEdit {
        zone_id: req.id,
        name: req.name,
        changes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::DistributionEntry;

    #[test]
    fn test_validate_percentage() {
        assert!(validate_percentage(0.0));
        assert!(validate_percentage(33.3));
        assert!(validate_percentage(100.0));
        assert!(!validate_percentage(-0.5));
        assert!(!validate_percentage(100.01));
        assert!(!validate_percentage(f64::NAN));
        assert!(!validate_percentage(f64::INFINITY));
    }

    #[test]
    fn test_validate_zone_name() {
        assert!(validate_zone_name(""));
        assert!(validate_zone_name("Downtown"));
        assert!(validate_zone_name(&"z".repeat(255)));
        assert!(!validate_zone_name(&"z".repeat(256)));
    }

    #[test]
    fn test_parse_edit_request_keeps_order() {
        let req = EditZoneRequest {
            id: 3,
            name: "east".to_string(),
            distributions: vec![
                DistributionEntry { id: None, percentage: 20.0 },
                DistributionEntry { id: Some(8), percentage: 80.0 },
            ],
        };

        let edit = parse_edit_request(req).unwrap();
        assert_eq!(edit.zone_id, 3);
        assert_eq!(edit.name, "east");
        assert_eq!(
            edit.changes,
            vec![
                DistributionChange::Create { percentage: 20.0 },
                DistributionChange::Update { id: 8, percentage: 80.0 },
            ]
        );
    }

    #[test]
    fn test_parse_edit_request_zero_id_creates() {
        let req = EditZoneRequest {
            id: 3,
            name: "east".to_string(),
            distributions: vec![DistributionEntry { id: Some(0), percentage: 100.0 }],
        };

        let edit = parse_edit_request(req).unwrap();
        assert_eq!(
            edit.changes,
            vec![DistributionChange::Create { percentage: 100.0 }]
        );
    }

    #[test]
    fn test_parse_edit_request_names_bad_entry() {
        let req = EditZoneRequest {
            id: 3,
            name: "east".to_string(),
            distributions: vec![
                DistributionEntry { id: None, percentage: 20.0 },
                DistributionEntry { id: None, percentage: 120.0 },
            ],
        };

        let err = parse_edit_request(req).unwrap_err();
        assert!(err.contains("distributions[1]"));
    }
}
