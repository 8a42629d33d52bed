use crate::cli::InputArgs;
use crate::input::parse_descriptor;
use clap::Parser;
use ntsd::Marshal;

#[derive(Parser, Debug)]
pub struct RoundtripCmd {
    #[command(flatten)]
    pub input: InputArgs,
}

pub fn roundtrip(cmd: &RoundtripCmd) -> Result<(), Box<dyn std::error::Error>> {
    check_roundtrip(&cmd.input.load()?)
}

/// Writes back the descriptor parsed from `data`, and compares it with the input.
fn check_roundtrip(data: &[u8]) -> Result<(), Box<dyn std::error::Error>> {
    let sd = parse_descriptor(data)?;
    let written = sd.marshal()?;
    println!("{}", hex::encode(&written));

    match first_difference(data, &written) {
        None => {
            log::info!("Round trip is byte-exact ({} bytes)", written.len());
            Ok(())
        }
        Some(offset) => {
            log::error!(
                "Output differs from input at offset {offset:#x} (input {} bytes, output {} bytes)",
                data.len(),
                written.len()
            );
            Err("round trip mismatch".into())
        }
    }
}

/// The first offset where `written` and the front of `input` disagree.
fn first_difference(input: &[u8], written: &[u8]) -> Option<usize> {
    let compared = &input[..written.len().min(input.len())];
    compared
        .iter()
        .zip(written)
        .position(|(a, b)| a != b)
        .or((compared.len() < written.len()).then_some(compared.len()))
}
