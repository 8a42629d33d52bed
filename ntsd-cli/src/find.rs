use crate::cli::InputArgs;
use crate::input::parse_descriptor;
use clap::Parser;
use ntsd::{AccessRight, Guid, Identity, SID, extended_right_guid, extended_right_name};
use std::collections::BTreeMap;
use std::str::FromStr;

#[derive(Parser, Debug)]
pub struct FindRightCmd {
    #[command(flatten)]
    pub input: InputArgs,

    /// A right to look for, by name (`GENERIC_ALL`) or value (`0x10000000`).
    #[arg(long, required = true, action = clap::ArgAction::Append)]
    pub right: Vec<RightArg>,

    /// Requires a single entry to grant all of the rights.
    #[arg(long)]
    pub all: bool,
}

#[derive(Parser, Debug)]
pub struct FindExtendedRightCmd {
    #[command(flatten)]
    pub input: InputArgs,

    /// An extended right to look for, by GUID or by name (`DS-Replication-Get-Changes`).
    #[arg(long, required = true, action = clap::ArgAction::Append)]
    pub guid: Vec<ExtendedRightArg>,

    /// Requires a single entry to grant all of the extended rights.
    #[arg(long)]
    pub all: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct RightArg(pub AccessRight);

impl FromStr for RightArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if let Some(right) = AccessRight::from_name(s) {
            return Ok(RightArg(right));
        }

        let hex = s
            .strip_prefix("0x")
            .ok_or_else(|| format!("Unknown access right: {s}"))?;
        let value = u32::from_str_radix(hex, 16)
            .map_err(|e| format!("Invalid access right value {s}: {e}"))?;
        AccessRight::from_value(value)
            .map(RightArg)
            .ok_or_else(|| format!("{s} is not a named access right"))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ExtendedRightArg(pub Guid);

impl FromStr for ExtendedRightArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        extended_right_guid(s)
            .or_else(|| Guid::from_str(s).ok())
            .map(ExtendedRightArg)
            .ok_or_else(|| format!("Not an extended right name or GUID: {s}"))
    }
}

pub fn find_right(cmd: &FindRightCmd) -> Result<(), Box<dyn std::error::Error>> {
    let sd = parse_descriptor(&cmd.input.load()?)?;
    let rights = cmd.right.iter().map(|r| r.0).collect::<Vec<_>>();

    let found = if cmd.all {
        sd.find_identities_with_all_rights(&rights)
    } else {
        sd.find_identities_with_any_right(&rights)
    };
    print_found(&found, |right| right.to_string());
    Ok(())
}

pub fn find_extended_right(cmd: &FindExtendedRightCmd) -> Result<(), Box<dyn std::error::Error>> {
    let sd = parse_descriptor(&cmd.input.load()?)?;
    let guids = cmd.guid.iter().map(|r| r.0).collect::<Vec<_>>();

    let found = if cmd.all {
        sd.find_identities_with_all_extended_rights(&guids)
    } else {
        sd.find_identities_with_any_extended_right(&guids)
    };
    print_found(&found, |guid| match extended_right_name(guid) {
        Some(name) => name.to_string(),
        None => guid.to_string(),
    });
    Ok(())
}

fn print_found<T>(found: &BTreeMap<SID, Vec<T>>, label: impl Fn(&T) -> String) {
    if found.is_empty() {
        log::info!("No matching identity");
        return;
    }
    for line in found_lines(found, label) {
        println!("{line}");
    }
}

fn found_lines<T>(found: &BTreeMap<SID, Vec<T>>, label: impl Fn(&T) -> String) -> Vec<String> {
    found
        .iter()
        .map(|(sid, matched)| {
            let identity = Identity::new(sid.clone());
            let labels = matched.iter().map(&label).collect::<Vec<_>>();
            format!("{identity}: {}", labels.join(", "))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn test_right_arg() {
        assert_eq!(RightArg::from_str("WRITE_DAC").unwrap().0, AccessRight::WriteDac);
        assert_eq!(
            RightArg::from_str("0x80000000").unwrap().0,
            AccessRight::GenericRead
        );
        assert!(RightArg::from_str("0x80000001").is_err());
        assert!(RightArg::from_str("0xnope").is_err());
        assert!(RightArg::from_str("READ_EVERYTHING").is_err());
    }

    #[test_log::test]
    fn test_extended_right_arg() {
        let by_name = ExtendedRightArg::from_str("ds-replication-get-changes").unwrap();
        let by_guid = ExtendedRightArg::from_str("1131f6aa-9c07-11d1-f79f-00c04fc2dcd2").unwrap();
        assert_eq!(by_name.0, by_guid.0);
        assert!(ExtendedRightArg::from_str("Fly-Away").is_err());
    }

    #[test_log::test]
    fn test_found_lines() {
        let found = BTreeMap::from([(
            SID::from_str(SID::S_ADMINISTRATORS).unwrap(),
            vec![AccessRight::GenericAll, AccessRight::WriteDac],
        )]);
        assert_eq!(
            found_lines(&found, |r| r.to_string()),
            vec!["S-1-5-32-544 (Administrators): GENERIC_ALL, WRITE_DAC"]
        );
    }
}
