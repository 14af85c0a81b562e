//! The canonical field dictionary.
//!
//! This table is the only configuration surface of the field mapper. It is compiled in and
//! versioned with the crate; synonyms are stored lower-case.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Version of the synonym table below. Bump whenever synonyms change.
pub const DICTIONARY_VERSION: u32 = 1;

/// A fixed target identifier that a source column may be mapped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalField {
    EquipmentId,
    EquipmentName,
    EquipmentType,
    Location,
    Manufacturer,
    Model,
    MaintenanceCycle,
    MaintenanceCost,
    MaintenanceType,
    Date,
    Planned,
    Actual,
    Status,
}

impl CanonicalField {
    /// Every canonical field, in dictionary order.
    pub const ALL: [CanonicalField; 13] = [
        Self::EquipmentId,
        Self::EquipmentName,
        Self::EquipmentType,
        Self::Location,
        Self::Manufacturer,
        Self::Model,
        Self::MaintenanceCycle,
        Self::MaintenanceCost,
        Self::MaintenanceType,
        Self::Date,
        Self::Planned,
        Self::Actual,
        Self::Status,
    ];

    /// Stable identifier, e.g. `"equipment_id"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::EquipmentId => "equipment_id",
            Self::EquipmentName => "equipment_name",
            Self::EquipmentType => "equipment_type",
            Self::Location => "location",
            Self::Manufacturer => "manufacturer",
            Self::Model => "model",
            Self::MaintenanceCycle => "maintenance_cycle",
            Self::MaintenanceCost => "maintenance_cost",
            Self::MaintenanceType => "maintenance_type",
            Self::Date => "date",
            Self::Planned => "planned",
            Self::Actual => "actual",
            Self::Status => "status",
        }
    }

    /// Known header synonyms (lower-case, Japanese and English).
    pub fn synonyms(self) -> &'static [&'static str] {
        match self {
            Self::EquipmentId => &[
                "設備id",
                "設備コード",
                "機器id",
                "機器番号",
                "設備番号",
                "equipment id",
                "equipment_id",
                "equipment code",
                "asset id",
                "id",
            ],
            Self::EquipmentName => &[
                "設備名",
                "設備名称",
                "機器名",
                "機器名称",
                "equipment name",
                "equipment_name",
                "asset name",
                "name",
            ],
            Self::EquipmentType => &[
                "設備種別",
                "機種",
                "分類",
                "種類",
                "equipment type",
                "category",
                "type",
            ],
            Self::Location => &["設置場所", "場所", "位置", "工場", "location", "site", "plant"],
            Self::Manufacturer => &["メーカー", "製造元", "製造者", "manufacturer", "maker", "vendor"],
            Self::Model => &["型式", "型番", "モデル", "model", "model number"],
            Self::MaintenanceCycle => &[
                "保全周期",
                "点検周期",
                "周期",
                "maintenance cycle",
                "interval",
                "cycle",
                "frequency",
            ],
            Self::MaintenanceCost => &[
                "費用",
                "保全費用",
                "コスト",
                "金額",
                "maintenance cost",
                "cost",
                "amount",
                "price",
            ],
            Self::MaintenanceType => &[
                "保全種別",
                "保全区分",
                "作業内容",
                "maintenance type",
                "work type",
            ],
            Self::Date => &[
                "日付",
                "実施日",
                "予定日",
                "点検日",
                "年月",
                "date",
                "maintenance date",
                "period",
            ],
            Self::Planned => &["計画", "予定", "planned", "plan", "scheduled"],
            Self::Actual => &["実績", "実施", "actual", "done", "completed", "result"],
            Self::Status => &["状態", "ステータス", "status", "state"],
        }
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown field identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownField(pub String);

impl fmt::Display for UnknownField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown canonical field '{}'", self.0)
    }
}

impl std::error::Error for UnknownField {}

impl FromStr for CanonicalField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}
