use crate::hex::HexCoord;

/// Current version of the [`ActorFlags`] layout.
pub const FLAG_SCHEMA_VERSION: u16 = 1;

/// Per-actor state captured alongside transform and health in snapshots.
///
/// Each field is named; actor types fill in the ones they carry and leave the
/// rest at their defaults.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ActorFlags {
    pub schema_version: u16,
    /// Whether a decoy can lure this actor.
    pub decoy_susceptible: bool,
    /// Cells a Gaia restores when triggered.
    pub restore_cells: Vec<HexCoord>,
}

impl ActorFlags {
    pub fn new() -> Self {
        Self {
            schema_version: FLAG_SCHEMA_VERSION,
            decoy_susceptible: false,
            restore_cells: Vec::new(),
        }
    }

    pub fn with_decoy_susceptible(mut self, susceptible: bool) -> Self {
        self.decoy_susceptible = susceptible;
        self
    }

    pub fn with_restore_cells(mut self, cells: Vec<HexCoord>) -> Self {
        self.restore_cells = cells;
        self
    }
}

impl Default for ActorFlags {
    fn default() -> Self {
        Self::new()
    }
}
