//! In-memory induction fleet catalogue.
//!
//! Stands in for the operations database: the ranklist page renders from
//! this fixed demo fleet. Persistence is out of scope here.

use serde::Serialize;

/// Induction status of a trainset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainStatus {
    /// Ready for revenue service.
    Ok,
    /// Inductable with minor maintenance pending.
    MinorMaintenance,
    /// Blocked from scheduling.
    CannotSchedule,
}

impl TrainStatus {
    /// Short label for badges and ribbons.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Ok => "Ready",
            Self::MinorMaintenance => "Minor maintenance",
            Self::CannotSchedule => "Cannot schedule",
        }
    }

    /// Badge CSS class for this status.
    #[must_use]
    pub fn badge_class(self) -> &'static str {
        match self {
            Self::Ok => "badge bg-success",
            Self::MinorMaintenance => "badge bg-warning text-dark",
            Self::CannotSchedule => "badge bg-danger",
        }
    }

    /// Ribbon CSS class for this status.
    #[must_use]
    pub fn ribbon_class(self) -> &'static str {
        match self {
            Self::Ok => "status-ribbon ribbon-ok",
            Self::MinorMaintenance => "status-ribbon ribbon-warning",
            Self::CannotSchedule => "status-ribbon ribbon-danger",
        }
    }
}

/// One trainset in the induction ranklist.
#[derive(Debug, Clone, Serialize)]
pub struct Train {
    pub number: &'static str,
    pub name: &'static str,
    pub status: TrainStatus,
    /// Induction rank, 1 = first out.
    pub rank: u32,
    pub mileage_km: u32,
    pub stabling_bay: &'static str,
    pub cleaning_status: &'static str,
    pub last_service: &'static str,
    /// Operator notes, shown in the status tooltip.
    pub notes: &'static str,
}

/// The demo fleet, ordered by induction rank.
#[must_use]
pub fn demo_fleet() -> Vec<Train> {
    let mut fleet = vec![
        Train {
            number: "KM-001",
            name: "Aluva Express",
            status: TrainStatus::Ok,
            rank: 1,
            mileage_km: 45_320,
            stabling_bay: "Bay-A1",
            cleaning_status: "Clean",
            last_service: "2024-01-15",
            notes: "All systems operational",
        },
        Train {
            number: "KM-002",
            name: "Kochi Central",
            status: TrainStatus::MinorMaintenance,
            rank: 2,
            mileage_km: 38_750,
            stabling_bay: "Bay-B2",
            cleaning_status: "Needs cleaning",
            last_service: "2024-01-10",
            notes: "Minor brake pad replacement needed",
        },
        Train {
            number: "KM-004",
            name: "Marine Drive",
            status: TrainStatus::Ok,
            rank: 3,
            mileage_km: 41_200,
            stabling_bay: "Bay-A2",
            cleaning_status: "Clean",
            last_service: "2024-01-20",
            notes: "Recently serviced, all systems green",
        },
        Train {
            number: "KM-005",
            name: "Kaloor Specialist",
            status: TrainStatus::MinorMaintenance,
            rank: 4,
            mileage_km: 33_900,
            stabling_bay: "Bay-B1",
            cleaning_status: "Needs deep cleaning",
            last_service: "2024-01-12",
            notes: "Scheduled maintenance due next week",
        },
        Train {
            number: "KM-003",
            name: "Ernakulam South",
            status: TrainStatus::CannotSchedule,
            rank: 5,
            mileage_km: 52_100,
            stabling_bay: "Maintenance Bay",
            cleaning_status: "Clean",
            last_service: "2024-01-05",
            notes: "Critical electrical system fault - requires immediate attention",
        },
    ];
    fleet.sort_by_key(|t| t.rank);
    fleet
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fleet_ordered_by_rank() {
        let fleet = demo_fleet();
        assert!(!fleet.is_empty());
        assert!(fleet.windows(2).all(|w| w[0].rank <= w[1].rank));
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(TrainStatus::Ok.label(), "Ready");
        assert!(TrainStatus::CannotSchedule.badge_class().contains("danger"));
    }
}
