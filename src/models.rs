use serde::{Deserialize, Serialize};
use uuid::Uuid;

/* -------------------------
   Chart enums
--------------------------*/

/// Every condition the platform knows about, for both whole teeth and
/// single surfaces. Wire values are snake_case strings; anything the
/// server sends outside this set fails deserialization instead of being
/// forwarded silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToothStatus {
    // Surface-scoped conditions
    Healthy,
    Caries,
    Filled,
    FilledDefective,
    Sealant,
    SealantDefective,
    Fracture,
    Dischromia,

    // Whole-tooth conditions
    Crown,
    CrownDefective,
    TemporaryCrown,
    Endodontics,
    Implant,
    Pontic,
    ExtractionNeeded,
    Extracted,
    Supernumerary,
}

impl ToothStatus {
    /// Whether this status applies to the whole tooth rather than one
    /// surface. Whole-tooth statuses fan out to all six surfaces on write.
    pub fn is_whole_tooth(self) -> bool {
        matches!(
            self,
            ToothStatus::Crown
                | ToothStatus::CrownDefective
                | ToothStatus::TemporaryCrown
                | ToothStatus::Endodontics
                | ToothStatus::Implant
                | ToothStatus::Pontic
                | ToothStatus::ExtractionNeeded
                | ToothStatus::Extracted
                | ToothStatus::Supernumerary
        )
    }
}

/// The six conventional faces of a tooth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Surface {
    Vestibular,
    Lingual,
    Palatal,
    Mesial,
    Distal,
    Occlusal,
}

impl Surface {
    pub const ALL: [Surface; 6] = [
        Surface::Vestibular,
        Surface::Lingual,
        Surface::Palatal,
        Surface::Mesial,
        Surface::Distal,
        Surface::Occlusal,
    ];
}

/// Chart scope selector. INITIAL and EVOLUTION are fully independent data
/// sets for the same patient.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    Initial,
    #[default]
    Evolution,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompositeStatus {
    Good,
    Bad,
}

/// Measurement site of a periodontal probing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiteLocation {
    Mesiobuccal,
    Buccal,
    Distobuccal,
    Mesiolingual,
    Lingual,
    Distolingual,
}

/* -------------------------
   Chart entities (server rows)
--------------------------*/

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tooth {
    pub id: Uuid,
    pub tooth_number: u8,
    pub status: ToothStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceState {
    pub id: Uuid,
    pub tooth_number: u8,
    pub surface: Surface,
    pub status: ToothStatus,
}

/// "Top box" composite finding on a tooth (e.g. a mobility grade).
/// Several can coexist per tooth, keyed by distinct `condition`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToothCompositeState {
    pub id: Uuid,
    pub tooth_number: u8,
    pub condition: String,
    #[serde(rename = "sub_type")]
    pub sub_type: Option<String>,
    pub abbreviation: String,
    pub status: CompositeStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DentalBridge {
    pub id: Uuid,
    pub start_tooth: u8,
    pub end_tooth: u8,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodontalMeasurement {
    pub id: Uuid,
    pub date: chrono::NaiveDate,
    pub tooth_number: u8,
    pub site: SiteLocation,
    pub probing_depth: Option<i32>,
    pub gingival_margin: Option<i32>,
    pub bleeding_on_probing: bool,
    pub suppuration: bool,
}

/* -------------------------
   API DTOs
--------------------------*/

/// Full chart for one (patient, record type) pair as the server sends it.
/// Every section may be absent; older backends omit `bridges` entirely.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPayload {
    #[serde(default)]
    pub whole_teeth: Vec<Tooth>,
    #[serde(default)]
    pub surfaces: Vec<SurfaceState>,
    #[serde(default)]
    pub tooth_states: Vec<ToothCompositeState>,
    #[serde(default)]
    pub bridges: Vec<DentalBridge>,
}

/// One discrete chart edit. `surface: None` means "set the whole tooth".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEntry {
    pub tooth_number: u8,
    pub status: ToothStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surface: Option<Surface>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateChartRequest {
    pub updates: Vec<UpdateEntry>,
    pub record_type: RecordType,
}

/// Composite-state fields as entered by the user, before the engine
/// attaches the active record type.
#[derive(Debug, Clone)]
pub struct ToothStateDraft {
    pub tooth_number: u8,
    pub condition: String,
    pub sub_type: Option<String>,
    pub abbreviation: String,
    pub status: CompositeStatus,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveCompositeStateRequest {
    pub tooth_number: u8,
    pub condition: String,
    #[serde(rename = "sub_type", skip_serializing_if = "Option::is_none")]
    pub sub_type: Option<String>,
    pub abbreviation: String,
    pub status: CompositeStatus,
    pub record_type: RecordType,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBridgeRequest {
    pub start_tooth: u8,
    pub end_tooth: u8,
    pub color: String,
    pub record_type: RecordType,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodontalUpdate {
    pub tooth_number: u8,
    pub site: SiteLocation,
    pub probing_depth: Option<i32>,
    pub gingival_margin: Option<i32>,
    pub bleeding_on_probing: bool,
    pub suppuration: bool,
}
