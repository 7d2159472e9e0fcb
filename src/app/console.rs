use crate::app::render::{OutputFormat, Renderer, CLOSING_REMARKS};
use crate::core::session::Session;
use crate::core::{ConfigProvider, CycleParameters};
use crate::utils::error::{CalcError, ErrorSeverity, Result};
use crate::utils::validation::parse_date;
use std::io::{BufRead, Write};

const HELP: &str = "Commands:
  cycle <YYYY-MM-DD> [cycle_length] [period_duration]   calculate the cycle
  gender <YYYY-MM-DD>                                   predict from intercourse date
  status                                                show the stored ovulation date
  reset                                                 forget the ovulation date
  help                                                  show this help
  quit                                                  leave the session";

#[derive(Debug, PartialEq, Eq)]
enum Step {
    Output(String),
    Quit,
}

/// Line-oriented console session. The ovulation date lives only as long as the
/// console does; each console is its own isolated session.
pub struct Console {
    session: Session,
    renderer: Renderer,
    default_cycle_length: u32,
    default_period_duration: u32,
}

impl Console {
    pub fn new(renderer: Renderer, default_cycle_length: u32, default_period_duration: u32) -> Self {
        Self {
            session: Session::new(),
            renderer,
            default_cycle_length,
            default_period_duration,
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Ok(Self::new(
            Renderer::from_config(config)?,
            config.default_cycle_length(),
            config.default_period_duration(),
        ))
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<()> {
        writeln!(output, "Period Tracker & Pregnancy Gender Predictor (FEMPREDICT)")?;
        writeln!(output, "SHETTLES METHOD. Type `help` for commands.")?;

        for line in input.lines() {
            let line = line?;
            match self.handle_line(&line) {
                Ok(Step::Output(text)) if text.is_empty() => {}
                Ok(Step::Output(text)) => writeln!(output, "{}", text)?,
                Ok(Step::Quit) => break,
                Err(e) if e.severity() == ErrorSeverity::Low => {
                    tracing::warn!("⚠️ {}", e);
                    writeln!(output, "Warning: {}", e.user_friendly_message())?;
                }
                Err(e) => {
                    tracing::error!("❌ {} (Category: {:?})", e, e.category());
                    writeln!(output, "Error: {}", e.user_friendly_message())?;
                }
            }
        }

        if self.renderer.format() == OutputFormat::Text {
            writeln!(output, "{}", CLOSING_REMARKS)?;
        }
        Ok(())
    }

    fn handle_line(&mut self, line: &str) -> Result<Step> {
        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else {
            return Ok(Step::Output(String::new()));
        };
        let args: Vec<&str> = parts.collect();

        match command {
            "cycle" => self.cycle(&args).map(Step::Output),
            "gender" => self.gender(&args).map(Step::Output),
            "status" => self.renderer.status(&self.session.state()).map(Step::Output),
            "reset" => {
                self.session.reset();
                tracing::info!("Session reset");
                Ok(Step::Output("Session cleared.".to_string()))
            }
            "help" => Ok(Step::Output(HELP.to_string())),
            "quit" | "exit" => Ok(Step::Quit),
            other => Err(CalcError::invalid_input(
                "command",
                other,
                "Unknown command, type `help`",
            )),
        }
    }

    fn cycle(&mut self, args: &[&str]) -> Result<String> {
        let start = args
            .first()
            .ok_or_else(|| CalcError::invalid_input("period_start", "", "A start date is required"))?;
        let cycle_length = parse_number("cycle_length", args.get(1), self.default_cycle_length)?;
        let period_duration =
            parse_number("period_duration", args.get(2), self.default_period_duration)?;

        let params = CycleParameters::parse(start, cycle_length, period_duration)?;
        let result = self.session.record_cycle(&params)?;
        self.renderer.cycle(&result)
    }

    fn gender(&self, args: &[&str]) -> Result<String> {
        let date = args.first().ok_or_else(|| {
            CalcError::invalid_input("intercourse_date", "", "An intercourse date is required")
        })?;
        let intercourse_date = parse_date("intercourse_date", date)?;
        let prediction = self.session.predict(intercourse_date)?;
        self.renderer.prediction(&prediction)
    }
}

fn parse_number(field_name: &str, value: Option<&&str>, default: u32) -> Result<u32> {
    match value {
        None => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|_| CalcError::invalid_input(field_name, raw, "Expected a whole number of days")),
    }
}
