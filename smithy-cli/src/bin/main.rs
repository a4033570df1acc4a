use smithy_cli::{actions, command_line, report, Command};
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    pretty_env_logger::init();

    match run() {
        Ok(had_errors) => {
            if had_errors {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<bool, Box<dyn Error>> {
    match command_line::parse()? {
        Command::Validate(cmd, options) => {
            let events = actions::validate(cmd)?;
            Ok(report::report_events(&events, options.use_color))
        }
        Command::Select(cmd, _options) => {
            for shape_id in actions::select(cmd)? {
                println!("{}", shape_id);
            }
            Ok(false)
        }
        Command::Convert(cmd, _options) => {
            actions::convert(cmd)?;
            Ok(false)
        }
        Command::Build(cmd, options) => {
            let result = actions::build(cmd)?;
            let events = result.all_events();
            let had_errors = report::report_events(&events, options.use_color);
            Ok(had_errors || !result.is_success())
        }
    }
}
