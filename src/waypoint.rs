use serde::Serialize;

/// A single GPX waypoint (`<wpt>`).
///
/// Every value is kept exactly as it appeared in the source document. The
/// four optional children default to the empty string, so a record always
/// carries six fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Waypoint {
    pub latitude: String,
    pub longitude: String,
    pub elevation: String,
    pub timestamp: String,
    pub name: String,
    pub description: String,
}

impl Waypoint {
    pub fn new(latitude: impl Into<String>, longitude: impl Into<String>) -> Self {
        Self {
            latitude: latitude.into(),
            longitude: longitude.into(),
            ..Default::default()
        }
    }

    /// Overwrite one of the optional fields. Repeated children simply call
    /// this again, so the last one in document order wins.
    pub fn set(&mut self, field: WaypointField, value: String) {
        match field {
            WaypointField::Elevation => self.elevation = value,
            WaypointField::Time => self.timestamp = value,
            WaypointField::Name => self.name = value,
            WaypointField::Description => self.description = value,
        }
    }
}

/// The optional `<wpt>` children that are carried into the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaypointField {
    Elevation,
    Time,
    Name,
    Description,
}

impl WaypointField {
    /// Map a local element name to a field; anything else is ignored.
    pub fn from_local_name(name: &[u8]) -> Option<Self> {
        match name {
            b"ele" => Some(Self::Elevation),
            b"time" => Some(Self::Time),
            b"name" => Some(Self::Name),
            b"desc" => Some(Self::Description),
            _ => None,
        }
    }
}
