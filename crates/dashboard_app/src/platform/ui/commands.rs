use std::path::PathBuf;

use dashboard_core::Msg;

use crate::platform::app::AppEvent;

pub const HELP: &str = "\
Commands:
  popular                 most popular products
  content [product name]  content-based recommendations
  collab [customer id]    collaborative filtering recommendations
  basket [item, item...]  market basket recommendations
  file <path>             select a dataset to upload
  upload                  upload the selected dataset
  show                    redraw the dashboard
  help                    this text
  quit                    exit
Omitted arguments reuse the last value.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Popular,
    Content(Option<String>),
    Collaborative(Option<String>),
    Basket(Option<String>),
    SelectFile(PathBuf),
    Upload,
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command {0:?}, type `help` for a list")]
    Unknown(String),
    #[error("`file` needs a path")]
    MissingPath,
}

/// Parses one input line. Blank lines yield `Ok(None)`.
///
/// Arguments are everything after the command word, with leading whitespace
/// removed and the rest kept verbatim.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim_start();
    if line.trim().is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim_start()),
        None => (line, ""),
    };
    let argument = (!rest.trim().is_empty()).then(|| rest.to_string());

    let command = match word.to_ascii_lowercase().as_str() {
        "popular" => Command::Popular,
        "content" => Command::Content(argument),
        "collab" | "collaborative" => Command::Collaborative(argument),
        "basket" => Command::Basket(argument),
        "file" => Command::SelectFile(PathBuf::from(argument.ok_or(CommandError::MissingPath)?)),
        "upload" => Command::Upload,
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        _ => return Err(CommandError::Unknown(word.to_string())),
    };
    Ok(Some(command))
}

/// Last values typed for each input, seeded with sample values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormInputs {
    pub product_name: String,
    pub customer_id: String,
    pub basket_items: String,
}

impl Default for FormInputs {
    fn default() -> Self {
        Self {
            product_name: "Xerox 1918".to_string(),
            customer_id: "AA-10315".to_string(),
            basket_items: "Staples, Paper".to_string(),
        }
    }
}

impl FormInputs {
    pub fn to_event(&mut self, command: Command) -> AppEvent {
        let msg = match command {
            Command::Popular => Msg::request_popular(),
            Command::Content(name) => {
                if let Some(name) = name {
                    self.product_name = name;
                }
                Msg::request_content(self.product_name.clone())
            }
            Command::Collaborative(customer) => {
                if let Some(customer) = customer {
                    self.customer_id = customer;
                }
                Msg::request_collaborative(self.customer_id.clone())
            }
            Command::Basket(items) => {
                if let Some(items) = items {
                    self.basket_items = items;
                }
                Msg::request_basket(self.basket_items.clone())
            }
            Command::SelectFile(path) => Msg::FileSelected(path),
            Command::Upload => Msg::UploadSubmitted,
            Command::Show => return AppEvent::Render,
            Command::Help => return AppEvent::Help,
            Command::Quit => return AppEvent::Quit,
        };
        AppEvent::Msg(msg)
    }
}
