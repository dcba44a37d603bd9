use std::{ffi::OsString, iter::once, path::PathBuf};

use crate::{
    app::*,
    library::{
        definitions::{DEFAULT_K, MAX_HIST_BINS},
        DescriptorCfg, ImageSetCfg, SearchCfg,
    },
};

const IMAGE_DIR: &str = "Image directory";
const IMAGE_PREFIX: &str = "Image prefix";
const IMAGE_SUFFIX: &str = "Image suffix";
const NUM_IMAGES: &str = "Number of images";
const NUM_BINS: &str = "Number of histogram bins";
const NUM_FEATURES: &str = "Number of features";
const NUM_CLOSEST: &str = "Number of closest images";
const QUERY_PATHS: &str = "Query paths";
const PARALLEL: &str = "Parallel search";
const JSON_OUTPUT: &str = "Json output";
const QUIET: &str = "Quiet";
const VERBOSE: &str = "Verbose";
const ARGS_FILE: &str = "Args file";
const GENERATE_COMPLETIONS: &str = "Generate bash completions";

fn build_clap_app() -> clap::App<'static, 'static> {
    //args are not added through method chaining because this appears to break rustfmt.
    let mut clap_app = clap::App::new("Image retrieval")
        .version("0.1")
        .about("Finds the indexed images most similar to a query image, by color histogram and by local features");

    clap_app = clap_app.arg(
        clap::Arg::with_name(IMAGE_DIR)
            .long("dir")
            .takes_value(true)
            .required_unless_one(&[ARGS_FILE, GENERATE_COMPLETIONS])
            .help("Directory holding the indexed images, including the trailing separator (e.g. ./images/)")
            .display_order(1),
    );

    clap_app = clap_app.arg(
        clap::Arg::with_name(IMAGE_PREFIX)
            .long("prefix")
            .takes_value(true)
            .default_value("")
            .help("File name prefix of the indexed images. Image i is found at <dir><prefix><i><suffix>")
            .display_order(2),
    );

    clap_app = clap_app.arg(
        clap::Arg::with_name(NUM_IMAGES)
            .short("n")
            .long("num-images")
            .takes_value(true)
            .required_unless_one(&[ARGS_FILE, GENERATE_COMPLETIONS])
            .help("Number of indexed images. Images are numbered from 0")
            .display_order(3),
    );

    clap_app = clap_app.arg(
        clap::Arg::with_name(IMAGE_SUFFIX)
            .long("suffix")
            .takes_value(true)
            .required_unless_one(&[ARGS_FILE, GENERATE_COMPLETIONS])
            .help("File name suffix of the indexed images (e.g. .png)")
            .display_order(4),
    );

    clap_app = clap_app.arg(
        clap::Arg::with_name(NUM_BINS)
            .long("bins")
            .takes_value(true)
            .required_unless_one(&[ARGS_FILE, GENERATE_COMPLETIONS])
            .help("Number of bins in each color channel histogram (1 to 255)")
            .display_order(5),
    );

    clap_app = clap_app.arg(
        clap::Arg::with_name(NUM_FEATURES)
            .long("features")
            .takes_value(true)
            .required_unless_one(&[ARGS_FILE, GENERATE_COMPLETIONS])
            .help("Maximum number of local features to extract from each image")
            .display_order(6),
    );

    clap_app = clap_app.arg(
        clap::Arg::with_name(NUM_CLOSEST)
            .short("k")
            .long("closest")
            .takes_value(true)
            .help("Number of closest images to report for each query")
            .display_order(7),
    );

    clap_app = clap_app.arg(
        clap::Arg::with_name(QUERY_PATHS)
            .long("query")
            .multiple(true)
            .min_values(1)
            .takes_value(true)
            .help("Query images. If not given, query paths are read from stdin until '#' is entered"),
    );

    clap_app = clap_app.arg(
        clap::Arg::with_name(PARALLEL)
            .long("parallel")
            .help("Spread the local feature search over all cores. Results are identical to a sequential search"),
    );

    clap_app = clap_app.arg(
        clap::Arg::with_name(JSON_OUTPUT)
            .long("json-output")
            .help("Print outputs in json format"),
    );

    clap_app = clap_app.arg(
        clap::Arg::with_name(QUIET)
            .long("quiet")
            .help("Only print errors, warnings and output")
            .conflicts_with(VERBOSE),
    );

    clap_app = clap_app.arg(
        clap::Arg::with_name(VERBOSE)
            .long("verbose")
            .help("Print progress of indexing and querying"),
    );

    clap_app = clap_app.arg(
        clap::Arg::with_name(ARGS_FILE)
            .long("args-file")
            .takes_value(true)
            .help("Read command line arguments from a file"),
    );

    clap_app = clap_app.arg(
        clap::Arg::with_name(GENERATE_COMPLETIONS)
            .long("generate-bash-completions")
            .help("Print bash completions to stdout"),
    );

    clap_app
}

pub fn generate_shell_completions() {
    build_clap_app().gen_completions_to("img_retrieval", clap::Shell::Bash, &mut std::io::stdout());
}

/// Parses the process arguments. Returns `Ok(None)` if the invocation only asked for shell completions.
pub fn parse_args() -> Result<Option<AppCfg>, AppError> {
    parse_args_from(std::env::args_os())
}

pub fn parse_args_from<I, T>(args: I) -> Result<Option<AppCfg>, AppError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let mut matches = build_clap_app().get_matches_from(args);

    //first check if a Args file is present. If so, then read it and use the arguments from within.
    if let Some(args_fname) = matches.value_of_os(ARGS_FILE) {
        let args_path = PathBuf::from(args_fname);
        let args = std::fs::read_to_string(&args_path).map_err(|e| AppError::ArgsFileNotFound(args_path.clone(), e))?;

        //now strip comments from the args file
        let args_file_contents =
            comment::shell::strip(args).map_err(|e| AppError::ArgsFileParse(args_path.clone(), e.to_string()))?;

        //the arguments file needs to be split into args in the same way as the shell would do it.
        let args = shell_words::split(&args_file_contents)
            .map_err(|e| AppError::ArgsFileParse(args_path.clone(), e.to_string()))?;

        //need to prepend program name as this is what would be seen in a direct shell invocation.
        let args = once("img_retrieval".to_string()).chain(args);

        matches = build_clap_app().get_matches_from(args);
    }

    if matches.is_present(GENERATE_COMPLETIONS) {
        generate_shell_completions();
        return Ok(None);
    }

    let num_images = parse_in_range(&matches, NUM_IMAGES, "num-images", None, 1, u32::MAX as u64)?;
    let num_bins = parse_in_range(&matches, NUM_BINS, "bins", None, 1, MAX_HIST_BINS as u64)?;
    let num_features = parse_in_range(&matches, NUM_FEATURES, "features", None, 1, u32::MAX as u64)?;
    let k = parse_in_range(&matches, NUM_CLOSEST, "closest", Some(DEFAULT_K as u64), 1, num_images)?;

    let image_set = ImageSetCfg {
        dir: matches.value_of_os(IMAGE_DIR).map(PathBuf::from).unwrap_or_default(),
        prefix: matches.value_of(IMAGE_PREFIX).unwrap_or_default().to_string(),
        suffix: matches.value_of(IMAGE_SUFFIX).unwrap_or_default().to_string(),
        num_images: num_images as usize,
    };

    let descriptor_cfg = DescriptorCfg {
        num_bins: num_bins as u32,
        num_features: num_features as usize,
    };

    let search_cfg = SearchCfg {
        k: k as usize,
        parallel: matches.is_present(PARALLEL),
    };

    let queries = match matches.values_of_os(QUERY_PATHS) {
        Some(paths) => QuerySource::Paths(paths.map(PathBuf::from).collect()),
        None => QuerySource::Interactive,
    };

    let verbosity = if matches.is_present(QUIET) {
        ReportVerbosity::Quiet
    } else if matches.is_present(VERBOSE) {
        ReportVerbosity::Verbose
    } else {
        ReportVerbosity::Default
    };

    let output_cfg = OutputCfg {
        json_output: matches.is_present(JSON_OUTPUT),
        verbosity,
    };

    Ok(Some(AppCfg {
        image_set,
        descriptor_cfg,
        search_cfg,
        queries,
        output_cfg,
    }))
}

//Fetch an integer argument and check it against inclusive bounds. A missing argument takes the default,
//or fails as out of range if there is no default (only possible when values came from an args file).
fn parse_in_range(
    matches: &clap::ArgMatches,
    name: &str,
    long: &'static str,
    default: Option<u64>,
    min: u64,
    max: u64,
) -> Result<u64, AppError> {
    let value = match (matches.value_of(name), default) {
        (Some(raw), _) => raw.trim().parse::<u64>().map_err(|_e| AppError::ParseNumber {
            arg: long,
            value: raw.to_string(),
        })?,
        (None, Some(default)) => default,
        (None, None) => 0,
    };

    if value < min || value > max {
        return Err(AppError::OutOfRange {
            arg: long,
            value,
            min,
            max,
        });
    }

    Ok(value)
}
