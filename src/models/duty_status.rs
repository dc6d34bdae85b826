use serde::Serialize;

/// Federal duty-status codes. The set is closed: anything else coming in
/// from the CLI or the database is rejected, never carried as a string.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum DutyStatus {
    Off,
    Sb,
    Dr,
    On,
}

impl DutyStatus {
    pub fn from_code(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "OFF" => Some(Self::Off),
            "SB" => Some(Self::Sb),
            "DR" => Some(Self::Dr),
            "ON" => Some(Self::On),
            _ => None,
        }
    }

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            DutyStatus::Off => "OFF",
            DutyStatus::Sb => "SB",
            DutyStatus::Dr => "DR",
            DutyStatus::On => "ON",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "OFF" => Some(DutyStatus::Off),
            "SB" => Some(DutyStatus::Sb),
            "DR" => Some(DutyStatus::Dr),
            "ON" => Some(DutyStatus::On),
            _ => None,
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            DutyStatus::Off => "Off Duty",
            DutyStatus::Sb => "Sleeper Berth",
            DutyStatus::Dr => "Driving",
            DutyStatus::On => "On Duty (Not Driving)",
        }
    }

    pub fn is_driving(&self) -> bool {
        matches!(self, DutyStatus::Dr)
    }

    /// ON and DR both consume duty-time budgets.
    pub fn is_on_duty(&self) -> bool {
        matches!(self, DutyStatus::Dr | DutyStatus::On)
    }

    /// OFF and SB count toward qualifying rest (10-hour reset).
    pub fn is_rest(&self) -> bool {
        matches!(self, DutyStatus::Off | DutyStatus::Sb)
    }
}
