#[macro_use]
extern crate clap;

use clap::Arg;

use mcx::{run_file, Options};

fn main() {
    let matches = app_from_crate!()
        .arg(
            Arg::with_name("SOURCE")
                .help("Sets the source file to compile and run")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("src")
                .short("s")
                .long("src")
                .help("Prints each source line with its bytecode, then exits without executing"),
        )
        .arg(
            Arg::with_name("debug")
                .short("d")
                .long("debug")
                .help("Prints every executed instruction"),
        )
        .arg(
            Arg::with_name("memory")
                .short("m")
                .long("memory")
                .takes_value(true)
                .value_name("MEMORY")
                .default_value("262144")
                .help("Sets the size of the data/heap/stack space in bytes"),
        )
        .arg(
            Arg::with_name("ARGS")
                .help("Arguments passed through to the guest program")
                .multiple(true),
        )
        .get_matches();

    let memory = value_t!(matches.value_of("memory"), usize).unwrap_or_else(|e| e.exit());
    let source = matches.value_of("SOURCE").unwrap();

    let options = Options {
        src_trace: matches.is_present("src"),
        debug: matches.is_present("debug"),
        memory,
    };

    // the guest sees the source path as argv[0]
    let mut args = vec![source.to_string()];
    if let Some(rest) = matches.values_of("ARGS") {
        args.extend(rest.map(String::from));
    }

    match run_file(source, &args, &options) {
        Ok(Some(status)) => std::process::exit(status as i32),
        Ok(None) => {}
        Err(err) => {
            // diagnostics go to stdout, alongside any guest output
            println!("{}", err);
            std::process::exit(-1);
        }
    }
}
