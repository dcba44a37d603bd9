use std::{
    error::Error,
    io::{BufRead, Write},
    path::Path,
};

use itertools::Itertools;

use crate::{
    app::*,
    library::{definitions::EXIT_TOKEN, preprocess, run_query, DescriptorDatabase, ImageExtractor, QueryOutput},
};

const ENTER_QUERY_MSG: &str = "Enter a query image or # to terminate:";
const EXIT_MSG: &str = "Exiting...";
const OUTPUT_GLOBAL_MSG: &str = "Nearest images using global descriptors:";
const OUTPUT_LOCAL_MSG: &str = "Nearest images using local descriptors:";

pub fn run_app() -> i32 {
    //Parse arguments and bail early if there is an error.
    let cfg = match parse_args() {
        Ok(Some(cfg)) => {
            configure_logs(cfg.output_cfg.verbosity);
            cfg
        }
        Ok(None) => return 0,
        Err(fatal) => {
            //The logger is configured from the parsed arguments, so it is not running yet.
            configure_logs(ReportVerbosity::Verbose);
            print_fatal_err(&fatal, ReportVerbosity::Verbose);
            return 1;
        }
    };

    match run_app_inner(&cfg) {
        Ok(()) => 0,
        Err(fatal_error) => {
            print_fatal_err(&fatal_error, cfg.output_cfg.verbosity);
            1
        }
    }
}

fn run_app_inner(cfg: &AppCfg) -> Result<(), AppError> {
    let extractor = ImageExtractor::default();

    info!(
        "Indexing {} images from {}",
        cfg.image_set.num_images,
        cfg.image_set.image_path(0).display()
    );
    let db = preprocess(&cfg.image_set, &cfg.descriptor_cfg, &extractor).map_err(AppError::Preprocessing)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match &cfg.queries {
        QuerySource::Paths(paths) => {
            let mut num_failed = 0;
            for path in paths {
                if let Err(e) = answer_query(path, &db, cfg, &extractor, &mut out) {
                    print_nonfatal_err(&e, cfg.output_cfg.verbosity);
                    num_failed += 1;
                }
            }

            if num_failed > 0 {
                return Err(AppError::QueriesFailed(num_failed));
            }
        }
        QuerySource::Interactive => {
            let stdin = std::io::stdin();
            query_loop(stdin.lock(), &mut out, &db, cfg, &extractor)?;
        }
    }

    Ok(())
}

//Prompt for query paths until the exit token or the end of input. A failed query is reported and the
//user is prompted again.
fn query_loop<R: BufRead, W: Write>(
    mut input: R,
    out: &mut W,
    db: &DescriptorDatabase,
    cfg: &AppCfg,
    extractor: &ImageExtractor,
) -> Result<(), AppError> {
    loop {
        writeln!(out, "{}", ENTER_QUERY_MSG)?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(());
        }

        let query = line.trim_end_matches(|c: char| c == '\n' || c == '\r');
        if query == EXIT_TOKEN {
            writeln!(out, "{}", EXIT_MSG)?;
            return Ok(());
        }

        if let Err(e) = answer_query(Path::new(query), db, cfg, extractor, out) {
            print_nonfatal_err(&e, cfg.output_cfg.verbosity);
        }
    }
}

fn answer_query<W: Write>(
    query: &Path,
    db: &DescriptorDatabase,
    cfg: &AppCfg,
    extractor: &ImageExtractor,
    out: &mut W,
) -> Result<(), AppError> {
    let output = run_query(query, db, &cfg.descriptor_cfg, &cfg.search_cfg, extractor)
        .map_err(|e| AppError::Query(query.to_path_buf(), e))?;

    write_query_output(&output, &cfg.output_cfg, out)
}

pub fn write_query_output<W: Write>(output: &QueryOutput, output_cfg: &OutputCfg, out: &mut W) -> Result<(), AppError> {
    if output_cfg.json_output {
        serde_json::to_writer_pretty(&mut *out, output).map_err(std::io::Error::from)?;
        writeln!(out)?;
    } else {
        writeln!(out, "{}", OUTPUT_GLOBAL_MSG)?;
        writeln!(out, "{}", output.global().iter().join(", "))?;
        writeln!(out, "{}", OUTPUT_LOCAL_MSG)?;
        writeln!(out, "{}", output.local().iter().join(", "))?;
    }

    Ok(())
}

fn print_fatal_err(fatal_err: &AppError, verbosity: ReportVerbosity) {
    error!(target: "app-errorlog", "{}", fatal_err);
    print_err_sources(fatal_err, verbosity);
}

fn print_nonfatal_err(err: &AppError, verbosity: ReportVerbosity) {
    warn!("{}", err);
    print_err_sources(err, verbosity);
}

fn print_err_sources(err: &AppError, verbosity: ReportVerbosity) {
    //causes are hidden in quiet mode
    if verbosity == ReportVerbosity::Quiet {
        return;
    }

    let mut source: Option<&(dyn Error + 'static)> = err.source();
    while let Some(e) = source {
        warn!("    caused by: {}", e);
        source = e.source();
    }
}

pub fn configure_logs(verbosity: ReportVerbosity) {
    use simplelog::*;

    let mut cfg = simplelog::ConfigBuilder::new();
    cfg.set_time_level(LevelFilter::Debug);

    let min_loglevel = match verbosity {
        ReportVerbosity::Quiet => LevelFilter::Warn,
        ReportVerbosity::Default => LevelFilter::Info,
        ReportVerbosity::Verbose => LevelFilter::Trace,
    };

    //only fails if a logger is already running, in which case that one is used.
    let _ = TermLogger::init(min_loglevel, cfg.build(), TerminalMode::Stderr, ColorChoice::Auto);
}

#[cfg(test)]
mod test {
    use std::path::PathBuf;

    use super::*;
    use crate::library::{DescriptorCfg, ImageSetCfg, SearchCfg};

    fn output_cfg(json_output: bool) -> OutputCfg {
        OutputCfg {
            json_output,
            verbosity: ReportVerbosity::Quiet,
        }
    }

    fn app_cfg() -> AppCfg {
        AppCfg {
            image_set: ImageSetCfg {
                dir: PathBuf::from("/nonexistent/"),
                prefix: "img".to_string(),
                suffix: ".png".to_string(),
                num_images: 1,
            },
            descriptor_cfg: DescriptorCfg {
                num_bins: 8,
                num_features: 10,
            },
            search_cfg: SearchCfg { k: 1, parallel: false },
            queries: QuerySource::Interactive,
            output_cfg: output_cfg(false),
        }
    }

    #[test]
    fn test_text_output() {
        let output = QueryOutput::new(PathBuf::from("q.png"), vec![1, 2, 0], vec![0, 1, 2]);
        let mut buf = vec![];

        write_query_output(&output, &output_cfg(false), &mut buf).unwrap();

        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "Nearest images using global descriptors:\n1, 2, 0\nNearest images using local descriptors:\n0, 1, 2\n"
        );
    }

    #[test]
    fn test_json_output() {
        let output = QueryOutput::new(PathBuf::from("q.png"), vec![4, 3], vec![3, 4]);
        let mut buf = vec![];

        write_query_output(&output, &output_cfg(true), &mut buf).unwrap();

        let parsed: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(parsed["query"], "q.png");
        assert_eq!(parsed["global"], serde_json::json!([4, 3]));
        assert_eq!(parsed["local"], serde_json::json!([3, 4]));
    }

    #[test]
    //unreadable queries are reported and the loop keeps prompting until the exit token.
    fn test_query_loop_exit_token() {
        let input = "/nonexistent/query.png\n#\nnever_read.png\n";
        let mut out = vec![];

        query_loop(
            input.as_bytes(),
            &mut out,
            &DescriptorDatabase::new(),
            &app_cfg(),
            &ImageExtractor::default(),
        )
        .unwrap();

        let out = String::from_utf8(out).unwrap();
        assert_eq!(out.matches(ENTER_QUERY_MSG).count(), 2);
        assert!(out.ends_with("Exiting...\n"));
    }

    #[test]
    fn test_query_loop_end_of_input() {
        let mut out = vec![];

        query_loop(
            "".as_bytes(),
            &mut out,
            &DescriptorDatabase::new(),
            &app_cfg(),
            &ImageExtractor::default(),
        )
        .unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), format!("{}\n", ENTER_QUERY_MSG));
    }
}
