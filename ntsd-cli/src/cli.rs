use crate::{
    describe::DescribeCmd,
    find::{FindExtendedRightCmd, FindRightCmd},
    roundtrip::RoundtripCmd,
};
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Prints the descriptor as a tree.
    Describe(DescribeCmd),
    /// Lists the identities an access-allowed entry grants some rights to.
    FindRight(FindRightCmd),
    /// Lists the identities an access-allowed entry grants some extended rights to.
    FindExtendedRight(FindExtendedRightCmd),
    /// Parses the descriptor, writes it back and compares the bytes.
    Roundtrip(RoundtripCmd),
}

/// Where the descriptor comes from, and how it is encoded.
#[derive(Args, Debug)]
pub struct InputArgs {
    /// The descriptor as hex text. Whitespace and a leading `0x` are ignored.
    pub input: String,

    /// INPUT is standard base64 text, as found in LDAP dumps.
    #[arg(long, conflicts_with = "file")]
    pub base64: bool,

    /// INPUT is the path of a file holding the binary descriptor.
    #[arg(long)]
    pub file: bool,
}
