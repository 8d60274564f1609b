use std::collections::BTreeMap;

use thiserror::Error;

use crate::models::{section, Document, FieldValue, Record};

/// MergeConflict: a device parameter uses one of the reserved section
/// names, which would silently shadow a list section.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("parameter key {key:?} collides with a reserved section name")]
pub struct MergeConflict {
    pub key: String,
}

/// Combine the device parameters with the three repeated-row sections
/// into a single document.
///
/// Pure transform: the inputs are consumed, nothing is mutated in place.
/// Empty row sequences become empty sections; the three section keys are
/// always present in the result.
pub fn merge(
    params: Record,
    vlans: Vec<Record>,
    etherchannels: Vec<Record>,
    interfaces: Vec<Record>,
) -> Result<Document, MergeConflict> {
    if let Some(key) = params.keys().find(|k| section::ALL.contains(&k.as_str())) {
        return Err(MergeConflict { key: key.clone() });
    }

    let mut fields: BTreeMap<String, FieldValue> = params
        .into_iter()
        .map(|(key, value)| (key, FieldValue::Scalar(value)))
        .collect();
    fields.insert(section::VLANS.to_string(), FieldValue::Records(vlans));
    fields.insert(
        section::ETHERCHANNELS.to_string(),
        FieldValue::Records(etherchannels),
    );
    fields.insert(
        section::INTERFACES.to_string(),
        FieldValue::Records(interfaces),
    );

    Ok(Document::new(fields))
}
