//! The canonical field schema for a generated switch configuration:
//! one strict, regex-backed definition of the device parameters and the
//! three nested record kinds.

use once_cell::sync::Lazy;

use super::{FieldSpec, RecordSchema};
use crate::models::section;

/// Canonical yes/no toggle values accepted by the sheets.
pub mod toggle {
    pub const YES: &str = "yes";
    pub const NO: &str = "no";

    pub const ALL: &[&str] = &[YES, NO];
}

/// Canonical spanning-tree mode values.
pub mod stp_mode {
    pub const PVST: &str = "pvst";
    pub const RAPID_PVST: &str = "rapid-pvst";
    pub const MST: &str = "mst";

    pub const ALL: &[&str] = &[PVST, RAPID_PVST, MST];
}

/// Canonical VTP mode values.
pub mod vtp_mode {
    pub const CLIENT: &str = "client";
    pub const SERVER: &str = "server";
    pub const TRANSPARENT: &str = "transparent";
    pub const OFF: &str = "off";

    pub const ALL: &[&str] = &[CLIENT, SERVER, TRANSPARENT, OFF];
}

/// Canonical password hashing algorithm values.
pub mod algorithm_type {
    pub const SCRYPT: &str = "scrypt";
    pub const SHA256: &str = "sha256";

    pub const ALL: &[&str] = &[SCRYPT, SHA256];
}

/// Canonical vty transport values.
pub mod transport {
    pub const SSH: &str = "ssh";
    pub const TELNET: &str = "telnet";
    pub const ALL_TRANSPORTS: &str = "all";

    pub const ALL: &[&str] = &[SSH, TELNET, ALL_TRANSPORTS];
}

/// Canonical switchport mode values.
pub mod port_mode {
    pub const ACCESS: &str = "access";
    pub const TRUNK: &str = "trunk";

    pub const ALL: &[&str] = &[ACCESS, TRUNK];
}

/// Canonical etherchannel negotiation mode values (LACP and PAgP).
pub mod channel_mode {
    pub const ACTIVE: &str = "active";
    pub const PASSIVE: &str = "passive";
    pub const ON: &str = "on";
    pub const AUTO: &str = "auto";
    pub const DESIRABLE: &str = "desirable";

    pub const ALL: &[&str] = &[ACTIVE, PASSIVE, ON, AUTO, DESIRABLE];
}

/// Canonical etherchannel layer values.
pub mod channel_type {
    pub const ALL: &[&str] = &["L2", "l2", "L3", "l3"];
}

const DIGITS: &str = "[0-9]+";

/// VLAN ids live in 1..=4094 on Catalyst platforms.
const VLAN_ID_MIN: u64 = 1;
const VLAN_ID_MAX: u64 = 4094;

/// Port-channel ids live in 1..=48.
const CHANNEL_ID_MIN: u64 = 1;
const CHANNEL_ID_MAX: u64 = 48;

/// errdisable recovery interval bounds, in seconds.
const ERRDISABLE_INTERVAL_MIN: u64 = 30;
const ERRDISABLE_INTERVAL_MAX: u64 = 86400;

/// Interface names: a type prefix, a leading unit number, optional
/// slot/port components and an optional subinterface suffix
/// (Gi1/0/24, Po10, Vlan100, Gi1/0/1.100).
const INTERFACE_NAME: &str = r"[A-Za-z-]+\d+(/\d+)*(\.\d+)?";

static DEVICE: Lazy<RecordSchema> = Lazy::new(|| {
    RecordSchema::new(vec![
        FieldSpec::scalar("hostname")
            .required()
            .pattern("[A-Za-z0-9_-]{1,63}"),
        FieldSpec::scalar("timezone").required(),
        FieldSpec::scalar("domain_name").non_empty().pattern(r"\S+"),
        FieldSpec::scalar("stp_mode").required().allowed(stp_mode::ALL),
        FieldSpec::scalar("vtp_domain"),
        FieldSpec::scalar("vtp_version").allowed(&["1", "2", "3"]),
        FieldSpec::scalar("vtp_mode").required().allowed(vtp_mode::ALL),
        FieldSpec::scalar("logging_console"),
        FieldSpec::scalar("logging_buffer_size").pattern(DIGITS),
        FieldSpec::scalar("http_server").allowed(toggle::ALL),
        FieldSpec::scalar("errdisable").allowed(toggle::ALL),
        FieldSpec::scalar("errdisable_recovery_interval")
            .pattern(DIGITS)
            .range(ERRDISABLE_INTERVAL_MIN, ERRDISABLE_INTERVAL_MAX)
            .depends_on(&["errdisable"]),
        FieldSpec::scalar("lldp").allowed(toggle::ALL),
        FieldSpec::scalar("username").required(),
        FieldSpec::scalar("algorithm_type")
            .required()
            .allowed(algorithm_type::ALL),
        FieldSpec::scalar("password").required(),
        FieldSpec::scalar("enable_password"),
        FieldSpec::scalar("ssh_key_size").pattern(DIGITS),
        FieldSpec::scalar("ssh_version").allowed(&["1", "2"]),
        FieldSpec::scalar("vty_lines").pattern(DIGITS),
        FieldSpec::scalar("login_local").allowed(toggle::ALL),
        FieldSpec::scalar("timeout").pattern(DIGITS),
        FieldSpec::scalar("transport_input").allowed(transport::ALL),
        FieldSpec::scalar("transport_output").allowed(transport::ALL),
        FieldSpec::records(section::VLANS, vlan_schema).required(),
        FieldSpec::records(section::ETHERCHANNELS, etherchannel_schema).required(),
        FieldSpec::records(section::INTERFACES, interface_schema).required(),
    ])
});

static VLAN: Lazy<RecordSchema> = Lazy::new(|| {
    RecordSchema::new(vec![
        FieldSpec::scalar("id")
            .required()
            .pattern(DIGITS)
            .range(VLAN_ID_MIN, VLAN_ID_MAX),
        FieldSpec::scalar("name").required(),
        FieldSpec::scalar("ip_addr"),
        FieldSpec::scalar("mask"),
        FieldSpec::scalar("desc"),
    ])
});

static ETHERCHANNEL: Lazy<RecordSchema> = Lazy::new(|| {
    RecordSchema::new(vec![
        FieldSpec::scalar("id")
            .required()
            .pattern(DIGITS)
            .range(CHANNEL_ID_MIN, CHANNEL_ID_MAX),
        FieldSpec::scalar("type").required().allowed(channel_type::ALL),
        FieldSpec::scalar("mode").allowed(channel_mode::ALL),
        FieldSpec::scalar("access_vlan")
            .pattern(DIGITS)
            .range(VLAN_ID_MIN, VLAN_ID_MAX),
        FieldSpec::scalar("native_vlan")
            .pattern(DIGITS)
            .range(VLAN_ID_MIN, VLAN_ID_MAX),
        FieldSpec::scalar("allowed_vlans"),
        FieldSpec::scalar("ip_addr"),
        FieldSpec::scalar("mask"),
        FieldSpec::scalar("desc"),
    ])
});

static INTERFACE: Lazy<RecordSchema> = Lazy::new(|| {
    RecordSchema::new(vec![
        FieldSpec::scalar("name").required().pattern(INTERFACE_NAME),
        FieldSpec::scalar("mode").required().allowed(port_mode::ALL),
        FieldSpec::scalar("access_vlan")
            .pattern(DIGITS)
            .range(VLAN_ID_MIN, VLAN_ID_MAX),
        FieldSpec::scalar("voice_vlan")
            .pattern(DIGITS)
            .range(VLAN_ID_MIN, VLAN_ID_MAX),
        FieldSpec::scalar("native_vlan")
            .pattern(DIGITS)
            .range(VLAN_ID_MIN, VLAN_ID_MAX),
        FieldSpec::scalar("allowed_vlans"),
        FieldSpec::scalar("portfast").allowed(toggle::ALL),
        FieldSpec::scalar("bpduguard").allowed(toggle::ALL),
        FieldSpec::scalar("portsecurity").allowed(toggle::ALL),
        FieldSpec::scalar("description"),
    ])
});

/// Schema for the merged top-level document.
pub fn device_schema() -> &'static RecordSchema {
    &DEVICE
}

/// Schema for one row of the vlans sheet.
pub fn vlan_schema() -> &'static RecordSchema {
    &VLAN
}

/// Schema for one row of the etherchannels sheet.
pub fn etherchannel_schema() -> &'static RecordSchema {
    &ETHERCHANNEL
}

/// Schema for one row of the port-mapping sheet.
pub fn interface_schema() -> &'static RecordSchema {
    &INTERFACE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ValueKind;

    #[test]
    fn test_device_schema_builds() {
        // Forces every Lazy static, which compiles every pattern.
        assert!(device_schema().fields().len() > 20);
        assert!(vlan_schema().contains("id"));
        assert!(etherchannel_schema().contains("type"));
        assert!(interface_schema().contains("name"));
    }

    #[test]
    fn test_sections_are_nested_record_fields() {
        for name in section::ALL {
            let spec = device_schema().get(name).unwrap();
            assert!(spec.required, "{name} must be required");
            assert!(
                matches!(spec.kind, ValueKind::Records(_)),
                "{name} must be a record section"
            );
        }
    }

    #[test]
    fn test_hostname_pattern() {
        let re = device_schema()
            .get("hostname")
            .unwrap()
            .pattern
            .as_ref()
            .unwrap();
        assert!(re.is_match("SW1"));
        assert!(re.is_match("core-sw_01"));
        assert!(!re.is_match(""));
        assert!(!re.is_match("bad host"));
        assert!(!re.is_match("a/b"));
    }

    #[test]
    fn test_domain_name_rejects_whitespace() {
        let re = device_schema()
            .get("domain_name")
            .unwrap()
            .pattern
            .as_ref()
            .unwrap();
        assert!(re.is_match("lab.example.com"));
        assert!(!re.is_match("lab example.com"));
        assert!(!re.is_match(""));
    }

    #[test]
    fn test_interface_name_pattern() {
        let re = interface_schema()
            .get("name")
            .unwrap()
            .pattern
            .as_ref()
            .unwrap();
        assert!(re.is_match("Gi1/0/1"));
        assert!(re.is_match("GigabitEthernet1/0/24"));
        assert!(re.is_match("Po10"));
        assert!(re.is_match("Vlan100"));
        assert!(re.is_match("Gi1/0/1.100"));
        assert!(!re.is_match("Gi"));
        assert!(!re.is_match("1/0/1"));
        assert!(!re.is_match("Gi1/0/1 extra"));
    }

    #[test]
    fn test_vlan_id_bounds() {
        let range = vlan_schema().get("id").unwrap().range.as_ref().unwrap();
        assert!(range.contains(&1));
        assert!(range.contains(&4094));
        assert!(!range.contains(&0));
        assert!(!range.contains(&4095));
    }

    #[test]
    fn test_errdisable_interval_declares_dependency() {
        let spec = device_schema().get("errdisable_recovery_interval").unwrap();
        assert_eq!(spec.dependencies, &["errdisable"]);
    }
}
