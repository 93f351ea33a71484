//! Describe an example config, or parse one and print it as JSON.
//!
//! Run with:
//!
//! ```text
//! cargo run --example sconfexample describe > example.conf
//! cargo run --example sconfexample parse example.conf
//! cargo run --example sconfexample parse < example.conf
//! ```

use sconf::record;
use std::env;
use std::error::Error;
use std::io;
use std::process;

record! {
    #[derive(Debug, Default)]
    struct Settings {
        #[sconf(rename = "A", doc = "this is the A-field")]
        a: i32,
        #[sconf(rename = "B")]
        b: bool,
        #[sconf(rename = "C", optional)]
        c: String,
    }
}

record! {
    #[derive(Debug, Default)]
    struct Entry {
        #[sconf(rename = "A")]
        a: i32,
        #[sconf(rename = "B")]
        b: bool,
        #[sconf(rename = "C")]
        c: String,
    }
}

record! {
    #[derive(Debug, Default)]
    struct Config {
        #[sconf(rename = "StringKey", optional, doc = "comment for stringKey")]
        string_key: String,
        #[sconf(rename = "IntKey")]
        int_key: i64,
        #[sconf(rename = "BoolKey")]
        bool_key: bool,
        #[sconf(rename = "Struct")]
        settings: Settings,
        #[sconf(rename = "StringArray")]
        string_array: Vec<String>,
        #[sconf(rename = "Nested", doc = "nested structs work just as well")]
        nested: Vec<Entry>,
    }
}

fn usage() -> ! {
    eprintln!("usage: sconfexample {{ describe | parse [file.conf] }}");
    process::exit(2);
}

fn example() -> Config {
    Config {
        string_key: "value1".to_string(),
        int_key: 123,
        bool_key: true,
        settings: Settings {
            a: 321,
            b: true,
            c: "this is text".to_string(),
        },
        string_array: vec!["blah".to_string(), "blah".to_string()],
        nested: vec![
            Entry {
                a: 1,
                b: false,
                c: "hoi".to_string(),
            },
            Entry {
                a: -1,
                b: true,
                c: "hallo".to_string(),
            },
        ],
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    match args.as_slice() {
        ["describe"] => sconf::describe(io::stdout().lock(), &example())?,
        ["parse", rest @ ..] => {
            let mut config = Config::default();
            match rest {
                [] => sconf::parse(io::stdin().lock(), &mut config)?,
                [path] => sconf::parse_file(path, &mut config)?,
                _ => usage(),
            }
            let json = serde_json::to_string_pretty(&sconf::to_value(&config))?;
            println!("{}", json);
        }
        _ => usage(),
    }
    Ok(())
}
