use std::fmt;
use std::ops::Index;

use canonical::{parse_digits, parse_leading_int};
use serde::{Deserialize, Deserializer, Serialize};

/// Number of slots in an inspection checklist.
pub const CHECKLIST_LEN: usize = 12;

/// Severity of one inspected item. Ordered `Good < Normal < Bad`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Good,
    Normal,
    Bad,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Good => "good",
            Status::Normal => "normal",
            Status::Bad => "bad",
        }
    }

    /// Map a free-text status label from the reference sheet onto the scale.
    ///
    /// Service words (`정비`, `필요`, `교환`, `교체`, `이상`, `bad`) win over
    /// watch words (`보통`, `점검`, `normal`), which win over the rest.
    /// Unrecognized or empty labels are `Good`.
    ///
    /// Matching ignores case, so `BAD` and `Normal` map like their lowercase
    /// codes. Sheet exports mix both spellings.
    pub fn from_label(label: &str) -> Self {
        const BAD: [&str; 6] = ["정비", "필요", "교환", "교체", "이상", "bad"];
        const NORMAL: [&str; 3] = ["보통", "점검", "normal"];

        let label = label.trim().to_lowercase();
        if BAD.iter().any(|word| label.contains(word)) {
            Status::Bad
        } else if NORMAL.iter().any(|word| label.contains(word)) {
            Status::Normal
        } else {
            Status::Good
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Status {
    /// Accepts the canonical codes or sheet labels.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let label = String::deserialize(deserializer)?;
        Ok(Status::from_label(&label))
    }
}

/// Reads an entry status, keeping `null`, missing and blank values unset.
fn deserialize_entry_status<'de, D>(deserializer: D) -> Result<Option<Status>, D::Error>
where
    D: Deserializer<'de>,
{
    let label = Option::<String>::deserialize(deserializer)?;
    Ok(label
        .filter(|label| !label.trim().is_empty())
        .map(|label| Status::from_label(&label)))
}

/// One checklist row.
///
/// `status` is `None` while the row has no status of its own; rules only
/// downgrade rows that are explicitly `Good`, and normalization fills the
/// gap afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistEntry {
    #[serde(
        default,
        deserialize_with = "deserialize_entry_status",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<Status>,
    #[serde(default, with = "canonical::loose_text")]
    pub memo: String,
}

impl ChecklistEntry {
    pub fn new(status: Status, memo: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            memo: memo.into(),
        }
    }

    /// A row with a memo but no status.
    pub fn unset(memo: impl Into<String>) -> Self {
        Self {
            status: None,
            memo: memo.into(),
        }
    }
}

/// The twelve inspected items, in checklist order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChecklistSlot {
    BrakeAndReverseLights,
    PowerSteeringFluid,
    EngineOil,
    BrakeFluid,
    TransmissionFluid,
    WasherFluid,
    Coolant,
    Wipers,
    Tires,
    Battery,
    Belts,
    BrakePads,
}

impl ChecklistSlot {
    pub const ALL: [ChecklistSlot; CHECKLIST_LEN] = [
        ChecklistSlot::BrakeAndReverseLights,
        ChecklistSlot::PowerSteeringFluid,
        ChecklistSlot::EngineOil,
        ChecklistSlot::BrakeFluid,
        ChecklistSlot::TransmissionFluid,
        ChecklistSlot::WasherFluid,
        ChecklistSlot::Coolant,
        ChecklistSlot::Wipers,
        ChecklistSlot::Tires,
        ChecklistSlot::Battery,
        ChecklistSlot::Belts,
        ChecklistSlot::BrakePads,
    ];

    /// Position of this slot in the externally visible 12-entry sequence.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Display label used on the printed report.
    pub fn label(self) -> &'static str {
        match self {
            ChecklistSlot::BrakeAndReverseLights => "브레이크등&후진등",
            ChecklistSlot::PowerSteeringFluid => "파워스티어링 오일",
            ChecklistSlot::EngineOil => "엔진 오일",
            ChecklistSlot::BrakeFluid => "브레이크 오일",
            ChecklistSlot::TransmissionFluid => "자동 변속기 오일",
            ChecklistSlot::WasherFluid => "워셔액",
            ChecklistSlot::Coolant => "냉각수",
            ChecklistSlot::Wipers => "와이퍼 작동 상태",
            ChecklistSlot::Tires => "타이어 외관 및 마모도",
            ChecklistSlot::Battery => "배터리/터미널",
            ChecklistSlot::Belts => "벨트류 갈라짐",
            ChecklistSlot::BrakePads => "브레이크 패드",
        }
    }
}

static UNSUPPLIED: ChecklistEntry = ChecklistEntry {
    status: None,
    memo: String::new(),
};

/// A fixed 12-slot checklist.
///
/// A slot holds `None` when the source never supplied it: a short array, or
/// `null` in the array. Rules skip such slots. Serializes as a plain
/// 12-element array with `null` for unsupplied slots; deserializing ignores
/// anything past the twelfth element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "Vec<Option<ChecklistEntry>>",
    into = "Vec<Option<ChecklistEntry>>"
)]
pub struct Checklist([Option<ChecklistEntry>; CHECKLIST_LEN]);

impl Checklist {
    /// A fresh form: every slot `Good` with no memo.
    pub fn new() -> Self {
        Self(std::array::from_fn(|_| {
            Some(ChecklistEntry::new(Status::Good, ""))
        }))
    }

    /// A checklist with no slot supplied.
    pub fn empty() -> Self {
        Self(std::array::from_fn(|_| None))
    }

    /// Build a checklist from leading entries. Slots past the end stay
    /// unsupplied; entries past the twelfth are ignored.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = ChecklistEntry>,
    {
        Self::from_slots(entries.into_iter().map(Some))
    }

    fn from_slots<I>(slots: I) -> Self
    where
        I: IntoIterator<Item = Option<ChecklistEntry>>,
    {
        let mut checklist = Self::empty();
        for (slot, entry) in checklist.0.iter_mut().zip(slots) {
            *slot = entry;
        }
        checklist
    }

    /// The entry in `slot`, or `None` if the slot was never supplied.
    pub fn get(&self, slot: ChecklistSlot) -> Option<&ChecklistEntry> {
        self.0[slot.index()].as_ref()
    }

    pub fn is_supplied(&self, slot: ChecklistSlot) -> bool {
        self.0[slot.index()].is_some()
    }

    pub fn set(&mut self, slot: ChecklistSlot, entry: ChecklistEntry) {
        self.0[slot.index()] = Some(entry);
    }

    pub(crate) fn slots_mut(&mut self) -> &mut [Option<ChecklistEntry>; CHECKLIST_LEN] {
        &mut self.0
    }

    /// Iterate `(slot, entry)` pairs in checklist order. Unsupplied slots
    /// yield an entry with no status and no memo.
    pub fn iter(&self) -> impl Iterator<Item = (ChecklistSlot, &ChecklistEntry)> {
        ChecklistSlot::ALL.into_iter().map(|slot| (slot, &self[slot]))
    }
}

impl Default for Checklist {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<ChecklistSlot> for Checklist {
    type Output = ChecklistEntry;

    fn index(&self, slot: ChecklistSlot) -> &Self::Output {
        self.get(slot).unwrap_or(&UNSUPPLIED)
    }
}

impl From<Vec<ChecklistEntry>> for Checklist {
    fn from(entries: Vec<ChecklistEntry>) -> Self {
        Self::from_entries(entries)
    }
}

impl From<Vec<Option<ChecklistEntry>>> for Checklist {
    fn from(slots: Vec<Option<ChecklistEntry>>) -> Self {
        Self::from_slots(slots)
    }
}

impl From<Checklist> for Vec<Option<ChecklistEntry>> {
    fn from(checklist: Checklist) -> Self {
        checklist.0.into()
    }
}

/// Odometer and model-year data the corrector reasons about.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleMetadata {
    #[serde(default, with = "canonical::loose_text")]
    pub current_mileage: String,
    #[serde(default, with = "canonical::loose_text")]
    pub last_mileage: String,
    #[serde(default, with = "canonical::loose_text")]
    pub year: String,
}

impl VehicleMetadata {
    pub fn new(
        current_mileage: impl Into<String>,
        last_mileage: impl Into<String>,
        year: impl Into<String>,
    ) -> Self {
        Self {
            current_mileage: current_mileage.into(),
            last_mileage: last_mileage.into(),
            year: year.into(),
        }
    }

    /// Current odometer reading; unparseable text reads as 0.
    pub fn current(&self) -> u64 {
        parse_digits(&self.current_mileage)
    }

    /// Distance since the last recorded service. May be negative.
    pub fn mileage_diff(&self) -> i64 {
        let current = i64::try_from(self.current()).unwrap_or(i64::MAX);
        let last = i64::try_from(parse_digits(&self.last_mileage)).unwrap_or(i64::MAX);
        current.saturating_sub(last)
    }

    /// Vehicle age in years relative to `current_year`.
    ///
    /// A missing, unparseable or zero model year is assumed to be
    /// `unknown_age` years old.
    pub fn vehicle_age(&self, current_year: i32, unknown_age: i64) -> i64 {
        let current_year = i64::from(current_year);
        let model_year = parse_leading_int(&self.year)
            .filter(|year| *year != 0)
            .unwrap_or(current_year - unknown_age);
        current_year.saturating_sub(model_year)
    }
}
