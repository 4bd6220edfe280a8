//! Terminal controls. Each line the user types becomes one `Command`.

use shared::catalog::ProductId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Categories,
    Category(String),
    Cards,
    Toggle(ProductId),
    Remove(ProductId),
    Hover(ProductId),
    Leave,
    Chips,
    Chat(String),
    Routine,
    Log,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  categories          list catalog categories
  category <name>     show a category (\"all\" for everything)
  cards               show the displayed products
  toggle <id>         select / deselect a displayed product
  remove <id>         remove a product from the selection
  hover <id>          show a product's description
  leave               stop hovering
  chips               show the selection
  chat <text>         talk to the advisor (bare text works too)
  routine             ask for a routine built from the selection
  log                 show the conversation
  help, quit";

/// `Ok(None)` for a blank line
pub fn parse(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((w, r)) => (w, r.trim()),
        None => (line, ""),
    };

    let id = |what: &str| -> Result<ProductId, String> {
        rest.parse::<ProductId>()
            .map_err(|_| format!("usage: {} <product id>", what))
    };

    let cmd = match word.to_lowercase().as_str() {
        "categories" => Command::Categories,
        "category" | "cat" => {
            if rest.is_empty() {
                return Err("usage: category <name>".to_string());
            }
            Command::Category(rest.to_string())
        }
        "cards" => Command::Cards,
        "toggle" => Command::Toggle(id("toggle")?),
        "remove" => Command::Remove(id("remove")?),
        "hover" => Command::Hover(id("hover")?),
        "leave" => Command::Leave,
        "chips" => Command::Chips,
        "chat" => Command::Chat(rest.to_string()),
        "routine" => Command::Routine,
        "log" => Command::Log,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => Command::Chat(line.to_string()),
    };
    Ok(Some(cmd))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse("  ").unwrap(), None);
        assert_eq!(parse("toggle 12").unwrap(), Some(Command::Toggle(12)));
        assert_eq!(
            parse("category Eye Care").unwrap(),
            Some(Command::Category("Eye Care".to_string()))
        );
        assert_eq!(parse("ROUTINE").unwrap(), Some(Command::Routine));
        assert_eq!(parse("chat").unwrap(), Some(Command::Chat(String::new())));
    }

    #[test]
    fn test_bare_text_is_chat() {
        assert_eq!(
            parse("is niacinamide ok with vitamin c?").unwrap(),
            Some(Command::Chat("is niacinamide ok with vitamin c?".to_string()))
        );
    }

    #[test]
    fn test_bad_ids_are_reported() {
        assert!(parse("toggle abc").is_err());
        assert!(parse("remove").is_err());
        assert!(parse("category").is_err());
    }
}
