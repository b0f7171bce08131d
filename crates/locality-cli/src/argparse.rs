use std::path::PathBuf;

use anyhow::Result;
use clap::{arg, command, value_parser, Arg, ArgAction, ArgGroup, ArgMatches, Command};
use locality_array::{BlockSizing, Storage};
use locality_core::MapOrder;
use locality_transform::Transform;

pub(crate) fn build_command() -> Command {
    command!() // requires `cargo` feature
        .name("ppmtrans")
        .arg(
            arg!(
                --rotate <degrees> "rotate clockwise by 0, 90, 180 or 270 degrees"
            )
            .required(false)
            .value_parser(value_parser!(u32)),
        )
        .arg(
            arg!(
                --flip <direction> "mirror the image"
            )
            .required(false)
            .value_parser(["horizontal", "vertical"]),
        )
        .arg(
            arg!(
                --transpose "swap rows and columns"
            )
            .required(false)
            .action(ArgAction::SetTrue),
        )
        .group(
            ArgGroup::new("transform")
                .args(["rotate", "flip", "transpose"])
                .multiple(false),
        )
        .arg(
            Arg::new("row-major")
                .long("row-major")
                .help("traverse the source in row-major order over plain storage")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("col-major")
                .long("col-major")
                .help("traverse the source in column-major order over plain storage")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("block-major")
                .long("block-major")
                .help("traverse the source block by block over blocked storage")
                .action(ArgAction::SetTrue),
        )
        .group(
            ArgGroup::new("order")
                .args(["row-major", "col-major", "block-major"])
                .multiple(false),
        )
        .arg(
            Arg::new("block-bytes")
                .long("block-bytes")
                .value_name("bytes")
                .help("memory budget per tile for block-major storage, default is 65536")
                .value_parser(value_parser!(usize))
                .requires("block-major"),
        )
        .arg(
            arg!(
                --time <file> "append the transform's timing to this file"
            )
            .required(false)
            .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            arg!(
                -v --verbose "log debug messages to stderr"
            )
            .required(false)
            .action(ArgAction::SetTrue),
        )
        .arg(
            arg!(
                [file] "input PPM, standard input when omitted"
            )
            .value_parser(value_parser!(PathBuf)),
        )
}

pub(crate) fn parse_args() -> ArgMatches {
    build_command().get_matches()
}

#[derive(Debug)]
pub(crate) struct RunConfig {
    pub(crate) input: Option<PathBuf>,
    pub(crate) transform: Transform,
    pub(crate) order: MapOrder,
    pub(crate) storage: Storage,
    pub(crate) time_file: Option<PathBuf>,
    pub(crate) verbose: bool,
}

impl RunConfig {
    fn from_args(mut args: ArgMatches) -> Result<RunConfig> {
        let transform = if let Some(degrees) = args.remove_one::<u32>("rotate") {
            Transform::from_rotation(degrees)?
        } else if let Some(direction) = args.remove_one::<String>("flip") {
            Transform::from_flip(&direction)?
        } else if args.get_flag("transpose") {
            Transform::Transpose
        } else {
            Transform::Rotate0
        };

        let order = if args.get_flag("col-major") {
            Some(MapOrder::ColMajor)
        } else if args.get_flag("block-major") {
            Some(MapOrder::BlockMajor)
        } else if args.get_flag("row-major") {
            Some(MapOrder::RowMajor)
        } else {
            None
        };

        let storage = match (order, args.remove_one::<usize>("block-bytes")) {
            (_, Some(0)) => anyhow::bail!("--block-bytes must be positive"),
            (_, Some(bytes)) => Storage::Blocked(BlockSizing::TargetBytes(bytes)),
            (Some(order), None) => Storage::for_order(order),
            (None, None) => Storage::default(),
        };
        let order = order.unwrap_or(storage.default_order());

        Ok(Self {
            input: args.remove_one::<PathBuf>("file"),
            transform,
            order,
            storage,
            time_file: args.remove_one::<PathBuf>("time"),
            verbose: args.get_flag("verbose"),
        })
    }
}

pub(crate) fn set_configs() -> Result<RunConfig> {
    RunConfig::from_args(parse_args())
}
