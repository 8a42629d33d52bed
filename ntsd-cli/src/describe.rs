use crate::cli::InputArgs;
use crate::input::parse_descriptor;
use clap::Parser;
use ntsd::describe::Describe;

#[derive(Parser, Debug)]
pub struct DescribeCmd {
    #[command(flatten)]
    pub input: InputArgs,

    /// Only prints the DACL.
    #[arg(long)]
    pub dacl: bool,
}

pub fn describe(cmd: &DescribeCmd) -> Result<(), Box<dyn std::error::Error>> {
    let sd = parse_descriptor(&cmd.input.load()?)?;

    if !cmd.dacl {
        print!("{sd}");
        return Ok(());
    }

    match sd.dacl() {
        Some(dacl) => print!("{}", dacl.describe()),
        None => log::warn!("The descriptor has no DACL"),
    }
    Ok(())
}
