//! CCSDS OEM (XML) parsing.
//!
//! Document shape, trimmed to what we read:
//!
//! ```text
//! ndm
//! └── oem
//!     ├── header   (CREATION_DATE, ORIGINATOR)
//!     └── body
//!         └── segment
//!             ├── metadata (OBJECT_NAME, REF_FRAME, START_TIME, ...)
//!             └── data
//!                 ├── COMMENT*
//!                 └── stateVector*  (EPOCH, X, Y, Z, X_DOT, Y_DOT, Z_DOT)
//! ```

use std::collections::HashSet;

use serde::Deserialize;
use tracing::{debug, warn};

use iss_core::error::{IssError, Result};
use iss_core::types::{parse_epoch, Ephemeris, OemHeader, OemMetadata, StateVector, Vector3};

#[derive(Debug, Deserialize)]
struct Ndm {
    oem: Oem,
}

#[derive(Debug, Deserialize)]
struct Oem {
    #[serde(default)]
    header: RawHeader,
    body: Body,
}

#[derive(Debug, Default, Deserialize)]
struct RawHeader {
    #[serde(rename = "CREATION_DATE")]
    creation_date: Option<String>,
    #[serde(rename = "ORIGINATOR")]
    originator: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Body {
    segment: Segment,
}

#[derive(Debug, Deserialize)]
struct Segment {
    #[serde(default)]
    metadata: RawMetadata,
    data: Data,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
struct RawMetadata {
    object_name: Option<String>,
    object_id: Option<String>,
    center_name: Option<String>,
    ref_frame: Option<String>,
    time_system: Option<String>,
    start_time: Option<String>,
    stop_time: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Data {
    #[serde(rename = "stateVector", default)]
    state_vectors: Vec<RawStateVector>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
struct RawStateVector {
    epoch: String,
    x: Quantity,
    y: Quantity,
    z: Quantity,
    x_dot: Quantity,
    y_dot: Quantity,
    z_dot: Quantity,
}

/// `<X units="km">-4530.2</X>`: the units attribute is fixed by the standard.
#[derive(Debug, Deserialize)]
struct Quantity {
    #[serde(rename = "$text")]
    value: f64,
}

impl From<RawStateVector> for StateVector {
    fn from(raw: RawStateVector) -> Self {
        StateVector::new(
            raw.epoch.trim(),
            Vector3::new(raw.x.value, raw.y.value, raw.z.value),
            Vector3::new(raw.x_dot.value, raw.y_dot.value, raw.z_dot.value),
        )
    }
}

/// Parses an OEM XML document.
///
/// Every epoch must be a valid CCSDS day-of-year timestamp. Should an epoch
/// appear twice, the later vector wins. A document without a single state
/// vector is an `EmptyFeed`.
pub fn parse_oem(xml: &str) -> Result<Ephemeris> {
    if xml.trim().is_empty() {
        return Err(IssError::EmptyFeed);
    }

    let ndm: Ndm =
        quick_xml::de::from_str(xml).map_err(|e| IssError::MalformedFeed(e.to_string()))?;
    let Oem { header, body } = ndm.oem;
    let Segment { metadata, data } = body.segment;

    if data.state_vectors.is_empty() {
        return Err(IssError::EmptyFeed);
    }

    let mut seen = HashSet::with_capacity(data.state_vectors.len());
    let mut vectors: Vec<StateVector> = Vec::with_capacity(data.state_vectors.len());

    for raw in data.state_vectors {
        let sv = StateVector::from(raw);
        parse_epoch(&sv.epoch)
            .map_err(|_| IssError::MalformedFeed(format!("bad EPOCH '{}'", sv.epoch)))?;

        if !seen.insert(sv.epoch.clone()) {
            warn!(epoch = %sv.epoch, "Duplicate epoch in feed, keeping the later vector");
            vectors.retain(|existing| existing.epoch != sv.epoch);
        }
        vectors.push(sv);
    }

    debug!(count = vectors.len(), "Parsed OEM state vectors");

    Ok(Ephemeris {
        header: OemHeader {
            creation_date: header.creation_date,
            originator: header.originator,
        },
        metadata: OemMetadata {
            object_name: metadata.object_name,
            object_id: metadata.object_id,
            center_name: metadata.center_name,
            ref_frame: metadata.ref_frame,
            time_system: metadata.time_system,
            start_time: metadata.start_time,
            stop_time: metadata.stop_time,
        },
        vectors,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const SAMPLE_OEM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ndm xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:noNamespaceSchemaLocation="http://sanaregistry.org/r/ndmxml_unqualified/ndmxml-2.0.0-master-2.0.xsd">
  <oem id="CCSDS_OEM_VERS" version="2.0">
    <header>
      <CREATION_DATE>2024-047T19:42:41.229Z</CREATION_DATE>
      <ORIGINATOR>JSC</ORIGINATOR>
    </header>
    <body>
      <segment>
        <metadata>
          <OBJECT_NAME>ISS</OBJECT_NAME>
          <OBJECT_ID>1998-067-A</OBJECT_ID>
          <CENTER_NAME>EARTH</CENTER_NAME>
          <REF_FRAME>EME2000</REF_FRAME>
          <TIME_SYSTEM>UTC</TIME_SYSTEM>
          <START_TIME>2024-047T12:00:00.000Z</START_TIME>
          <STOP_TIME>2024-047T12:08:00.000Z</STOP_TIME>
        </metadata>
        <data>
          <COMMENT>Source: This file was produced by the TOPO office</COMMENT>
          <COMMENT>MASS=459325.00 kg</COMMENT>
          <stateVector>
            <EPOCH>2024-047T12:00:00.000Z</EPOCH>
            <X units="km">-4530.2</X>
            <Y units="km">2104.6</Y>
            <Z units="km">4514.9</Z>
            <X_DOT units="km/s">-3.42</X_DOT>
            <Y_DOT units="km/s">-6.55</Y_DOT>
            <Z_DOT units="km/s">-0.38</Z_DOT>
          </stateVector>
          <stateVector>
            <EPOCH>2024-047T12:04:00.000Z</EPOCH>
            <X units="km">-5225.3</X>
            <Y units="km">527.1</Y>
            <Z units="km">4206.7</Z>
            <X_DOT units="km/s">-2.39</X_DOT>
            <Y_DOT units="km/s">-6.63</Y_DOT>
            <Z_DOT units="km/s">-2.14</Z_DOT>
          </stateVector>
          <COMMENT>End of arc</COMMENT>
          <stateVector>
            <EPOCH>2024-047T12:08:00.000Z</EPOCH>
            <X units="km">-5575.5</X>
            <Y units="km">-1064.8</Y>
            <Z units="km">3512.0</Z>
            <X_DOT units="km/s">-0.89</X_DOT>
            <Y_DOT units="km/s">-6.52</Y_DOT>
            <Z_DOT units="km/s">-3.62</Z_DOT>
          </stateVector>
        </data>
      </segment>
    </body>
  </oem>
</ndm>"#;

    #[test]
    fn test_parse_sample() {
        let eph = parse_oem(SAMPLE_OEM).unwrap();
        assert_eq!(eph.len(), 3);

        let first = &eph.vectors[0];
        assert_eq!(first.epoch, "2024-047T12:00:00.000Z");
        assert_eq!(first.position, Vector3::new(-4530.2, 2104.6, 4514.9));
        assert_eq!(first.velocity, Vector3::new(-3.42, -6.55, -0.38));

        assert_eq!(eph.vectors[2].epoch, "2024-047T12:08:00.000Z");
        assert_eq!(eph.vectors[2].velocity.z, -3.62);
    }

    #[test]
    fn test_parse_header_and_metadata() {
        let eph = parse_oem(SAMPLE_OEM).unwrap();
        assert_eq!(eph.header.originator.as_deref(), Some("JSC"));
        assert_eq!(eph.header.creation_date.as_deref(), Some("2024-047T19:42:41.229Z"));
        assert_eq!(eph.metadata.object_name.as_deref(), Some("ISS"));
        assert_eq!(eph.metadata.ref_frame.as_deref(), Some("EME2000"));
        assert_eq!(eph.metadata.stop_time.as_deref(), Some("2024-047T12:08:00.000Z"));
    }

    #[test]
    fn test_parse_empty_body() {
        assert!(matches!(parse_oem(""), Err(IssError::EmptyFeed)));
        assert!(matches!(parse_oem("  \n "), Err(IssError::EmptyFeed)));
    }

    #[test]
    fn test_parse_not_xml() {
        assert!(matches!(
            parse_oem("<html><body>Access Denied</body></html>"),
            Err(IssError::MalformedFeed(_))
        ));
    }

    #[test]
    fn test_parse_bad_number() {
        let xml = SAMPLE_OEM.replace("-4530.2", "not-a-number");
        assert!(matches!(parse_oem(&xml), Err(IssError::MalformedFeed(_))));
    }

    #[test]
    fn test_parse_bad_epoch() {
        let xml = SAMPLE_OEM.replace("2024-047T12:04:00.000Z", "yesterday");
        let err = parse_oem(&xml).unwrap_err();
        assert!(err.to_string().contains("yesterday"));
    }

    #[test]
    fn test_parse_duplicate_epoch_keeps_later() {
        let xml = SAMPLE_OEM.replace("2024-047T12:08:00.000Z</EPOCH>", "2024-047T12:00:00.000Z</EPOCH>");
        let eph = parse_oem(&xml).unwrap();
        assert_eq!(eph.len(), 2);
        let dup = eph
            .vectors
            .iter()
            .find(|sv| sv.epoch == "2024-047T12:00:00.000Z")
            .unwrap();
        assert_eq!(dup.position.x, -5575.5);
    }

    #[test]
    fn test_parse_no_state_vectors() {
        let xml = r#"<ndm><oem><header/><body><segment><metadata/><data><COMMENT>none</COMMENT></data></segment></body></oem></ndm>"#;
        assert!(matches!(parse_oem(xml), Err(IssError::EmptyFeed)));
    }
}
