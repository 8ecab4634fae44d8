use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::api::ChartApi;
use crate::error::{ChartError, ChartResult};
use crate::models::{
    ChartPayload, CreateBridgeRequest, DentalBridge, PeriodontalMeasurement, PeriodontalUpdate,
    RecordType, SaveCompositeStateRequest, Surface, SurfaceState, Tooth, ToothCompositeState,
    ToothStateDraft, ToothStatus, UpdateChartRequest, UpdateEntry,
};

/// Expand a batch of chart edits into the exact entries sent to the server.
///
/// Whole-tooth statuses are not stored per surface independently: an entry
/// carrying one (with or without an explicit surface) replaces every raw
/// entry for that tooth with six synthesized surface entries, so the tooth
/// and all its surfaces always agree. If a tooth receives more than one
/// whole-tooth status in the batch, the last one wins. Surface-scoped
/// entries pass through, deduplicated per (tooth, surface) pair, last wins.
pub fn expand_updates(updates: &[UpdateEntry]) -> Vec<UpdateEntry> {
    let mut whole: Vec<(u8, ToothStatus)> = Vec::new();
    let mut rest: Vec<UpdateEntry> = Vec::new();

    for entry in updates {
        if entry.status.is_whole_tooth() {
            match whole.iter_mut().find(|(n, _)| *n == entry.tooth_number) {
                Some(slot) => slot.1 = entry.status,
                None => whole.push((entry.tooth_number, entry.status)),
            }
        } else {
            rest.push(*entry);
        }
    }

    // Raw entries for a tooth that also got a whole-tooth status are
    // superseded by its fan-out.
    rest.retain(|e| !whole.iter().any(|(n, _)| *n == e.tooth_number));

    let mut batch: Vec<UpdateEntry> = Vec::with_capacity(whole.len() * 6 + rest.len());
    for (tooth_number, status) in whole {
        for surface in Surface::ALL {
            batch.push(UpdateEntry {
                tooth_number,
                status,
                surface: Some(surface),
            });
        }
    }
    for entry in rest {
        match batch
            .iter_mut()
            .find(|e| e.tooth_number == entry.tooth_number && e.surface == entry.surface)
        {
            Some(slot) => *slot = entry,
            None => batch.push(entry),
        }
    }
    batch
}

/// In-memory view of one patient's dental chart for the active record type.
///
/// Owns the normalized maps and translates user-level edits into minimal
/// remote update requests. Every mutation follows the same pattern: attempt
/// the remote write, adopt the server-returned truth on success, leave local
/// state untouched on failure. One instance per open patient view; drop it
/// (or call [`reset`](Self::reset)) when navigating away.
pub struct OdontogramEngine {
    api: Arc<dyn ChartApi>,
    record_type: RecordType,
    whole_teeth: HashMap<u8, Tooth>,
    surfaces: HashMap<u8, HashMap<Surface, SurfaceState>>,
    tooth_states: HashMap<u8, Vec<ToothCompositeState>>,
    bridges: Vec<DentalBridge>,
    measurements: Vec<PeriodontalMeasurement>,
    busy: bool,
}

impl OdontogramEngine {
    pub fn new(api: Arc<dyn ChartApi>) -> Self {
        Self {
            api,
            record_type: RecordType::default(),
            whole_teeth: HashMap::new(),
            surfaces: HashMap::new(),
            tooth_states: HashMap::new(),
            bridges: Vec::new(),
            measurements: Vec::new(),
            busy: false,
        }
    }

    /* -------------------------
       Read access
    --------------------------*/

    pub fn record_type(&self) -> RecordType {
        self.record_type
    }

    /// True while a remote call is in flight. Exposed for UI gating only;
    /// the engine does not serialize overlapping requests itself.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn whole_teeth(&self) -> &HashMap<u8, Tooth> {
        &self.whole_teeth
    }

    pub fn whole_tooth(&self, tooth_number: u8) -> Option<&Tooth> {
        self.whole_teeth.get(&tooth_number)
    }

    pub fn surfaces(&self) -> &HashMap<u8, HashMap<Surface, SurfaceState>> {
        &self.surfaces
    }

    pub fn surface(&self, tooth_number: u8, surface: Surface) -> Option<&SurfaceState> {
        self.surfaces.get(&tooth_number)?.get(&surface)
    }

    pub fn tooth_states(&self, tooth_number: u8) -> &[ToothCompositeState] {
        self.tooth_states
            .get(&tooth_number)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn bridges(&self) -> &[DentalBridge] {
        &self.bridges
    }

    pub fn measurements(&self) -> &[PeriodontalMeasurement] {
        &self.measurements
    }

    /* -------------------------
       Chart operations
    --------------------------*/

    /// Fetch the full chart for the active record type and replace all
    /// local maps with it. A fresh load is authoritative; nothing is merged.
    pub async fn load_chart(&mut self, patient_id: &str) -> ChartResult<()> {
        check_patient_id(patient_id)?;

        self.busy = true;
        let result = self.api.get_chart(patient_id, self.record_type).await;
        self.busy = false;

        self.adopt_chart(result?);
        debug!(
            teeth = self.whole_teeth.len(),
            bridges = self.bridges.len(),
            "chart loaded"
        );
        Ok(())
    }

    /// Switch between the INITIAL and EVOLUTION scopes and reload. The two
    /// scopes are independent data sets; nothing from the previous one may
    /// remain visible afterwards.
    pub async fn set_record_type(
        &mut self,
        patient_id: &str,
        record_type: RecordType,
    ) -> ChartResult<()> {
        self.record_type = record_type;
        self.load_chart(patient_id).await
    }

    /// Apply one or more chart edits as a single atomic batch.
    ///
    /// Edits are expanded via [`expand_updates`] before sending. The server
    /// recomputes and returns the full chart, which replaces local state
    /// wholesale; the client never merges optimistically.
    pub async fn apply_status_update(
        &mut self,
        patient_id: &str,
        updates: &[UpdateEntry],
    ) -> ChartResult<()> {
        check_patient_id(patient_id)?;
        for entry in updates {
            check_tooth_number(entry.tooth_number)?;
        }

        let req = UpdateChartRequest {
            updates: expand_updates(updates),
            record_type: self.record_type,
        };

        self.busy = true;
        let result = self.api.patch_chart(patient_id, &req).await;
        self.busy = false;

        self.adopt_chart(result?);
        debug!(entries = req.updates.len(), "chart batch applied");
        Ok(())
    }

    /// Save a composite ("top box") state. An existing entry with the same
    /// condition on the same tooth is replaced in place, keeping the order
    /// of unrelated conditions stable; a new condition is appended.
    pub async fn save_tooth_state(
        &mut self,
        patient_id: &str,
        draft: ToothStateDraft,
    ) -> ChartResult<()> {
        check_patient_id(patient_id)?;
        check_tooth_number(draft.tooth_number)?;

        let req = SaveCompositeStateRequest {
            tooth_number: draft.tooth_number,
            condition: draft.condition,
            sub_type: draft.sub_type,
            abbreviation: draft.abbreviation,
            status: draft.status,
            record_type: self.record_type,
        };
        let state = self.api.save_tooth_state(patient_id, &req).await?;

        let list = self.tooth_states.entry(state.tooth_number).or_default();
        match list.iter_mut().find(|s| s.condition == state.condition) {
            Some(slot) => *slot = state,
            None => list.push(state),
        }
        Ok(())
    }

    /// Delete a composite state by id. Locally a no-op when the id is not
    /// present for that tooth.
    pub async fn clear_tooth_state(
        &mut self,
        patient_id: &str,
        state_id: Uuid,
        tooth_number: u8,
    ) -> ChartResult<()> {
        check_patient_id(patient_id)?;
        self.api.clear_tooth_state(patient_id, state_id).await?;

        if let Some(list) = self.tooth_states.get_mut(&tooth_number) {
            list.retain(|s| s.id != state_id);
        }
        Ok(())
    }

    /// Add a bridge spanning two teeth. Endpoints are normalized to
    /// (min, max) before sending; caller order carries no meaning.
    pub async fn add_bridge(
        &mut self,
        patient_id: &str,
        tooth_a: u8,
        tooth_b: u8,
        color: &str,
    ) -> ChartResult<()> {
        check_patient_id(patient_id)?;
        check_tooth_number(tooth_a)?;
        check_tooth_number(tooth_b)?;

        let req = CreateBridgeRequest {
            start_tooth: tooth_a.min(tooth_b),
            end_tooth: tooth_a.max(tooth_b),
            color: color.to_string(),
            record_type: self.record_type,
        };
        let bridge = self.api.create_bridge(patient_id, &req).await?;
        self.bridges.push(bridge);
        Ok(())
    }

    pub async fn remove_bridge(&mut self, patient_id: &str, bridge_id: Uuid) -> ChartResult<()> {
        check_patient_id(patient_id)?;
        self.api.delete_bridge(patient_id, bridge_id).await?;
        self.bridges.retain(|b| b.id != bridge_id);
        Ok(())
    }

    /* -------------------------
       Periodontogram
    --------------------------*/

    /// Fetch the probing measurement list, replacing the local copy.
    pub async fn load_periodontogram(&mut self, patient_id: &str) -> ChartResult<()> {
        check_patient_id(patient_id)?;

        self.busy = true;
        let result = self.api.get_periodontogram(patient_id).await;
        self.busy = false;

        self.measurements = result?;
        Ok(())
    }

    /// Send a batch of probing updates, then refetch the full list. The
    /// server owns measurement ids and dating, so no local merge is
    /// attempted.
    pub async fn update_periodontogram(
        &mut self,
        patient_id: &str,
        updates: &[PeriodontalUpdate],
    ) -> ChartResult<()> {
        check_patient_id(patient_id)?;
        for entry in updates {
            check_tooth_number(entry.tooth_number)?;
        }

        self.api.patch_periodontogram(patient_id, updates).await?;
        self.load_periodontogram(patient_id).await
    }

    /// Clear everything and return to the default record type. Called when
    /// navigating away from a patient context.
    pub fn reset(&mut self) {
        self.record_type = RecordType::default();
        self.whole_teeth.clear();
        self.surfaces.clear();
        self.tooth_states.clear();
        self.bridges.clear();
        self.measurements.clear();
        self.busy = false;
    }

    /// Normalize a flat server payload into the lookup maps, replacing all
    /// prior chart state. Duplicate tooth numbers should not occur, but if
    /// they do the last entry wins.
    fn adopt_chart(&mut self, payload: ChartPayload) {
        let mut whole_teeth: HashMap<u8, Tooth> = HashMap::new();
        for tooth in payload.whole_teeth {
            whole_teeth.insert(tooth.tooth_number, tooth);
        }

        let mut surfaces: HashMap<u8, HashMap<Surface, SurfaceState>> = HashMap::new();
        for state in payload.surfaces {
            surfaces
                .entry(state.tooth_number)
                .or_default()
                .insert(state.surface, state);
        }

        let mut tooth_states: HashMap<u8, Vec<ToothCompositeState>> = HashMap::new();
        for state in payload.tooth_states {
            tooth_states.entry(state.tooth_number).or_default().push(state);
        }

        self.whole_teeth = whole_teeth;
        self.surfaces = surfaces;
        self.tooth_states = tooth_states;
        self.bridges = payload.bridges;
    }
}

fn check_patient_id(patient_id: &str) -> ChartResult<()> {
    if patient_id.trim().is_empty() {
        return Err(ChartError::InvalidRequest(
            "patient id must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn check_tooth_number(tooth_number: u8) -> ChartResult<()> {
    if !(1..=32).contains(&tooth_number) {
        return Err(ChartError::InvalidRequest(format!(
            "tooth number {tooth_number} outside 1..=32"
        )));
    }
    Ok(())
}
