//! # Line Shell
//!
//! A small line-oriented front end over the commands. One command per line;
//! errors are printed and the shell carries on.
//!
//! ```text
//! stockroom> login tech@example.com tech123
//! stockroom> items glove
//! stockroom> adjust 1718000000000 -3
//! stockroom> export history csv
//! ```

use std::collections::HashSet;
use std::io::{self, BufRead, Write};

use tokio::sync::watch;

use stockroom_core::export::ExportFormat;
use stockroom_core::validation::parse_stock_input;
use stockroom_core::{
    InventoryItem, ItemStatus, Language, LevelField, StockLevels, Translator,
};

use crate::commands::inventory::{AddItemInput, ItemDto};
use crate::commands::{auth, category, export, history, inventory, preferences};
use crate::error::ApiError;
use crate::state::{AppConfig, InventoryState, PreferencesState, SessionState};

const HELP: &str = "\
Commands:
  login <email> <password>      Sign in
  logout                        Sign out
  whoami                        Show the signed-in user
  stats                         Dashboard counters
  items [search]                Items grouped by category
  categories                    Categories with item counts
  add-category <name>           Add a category
  add-item <category-id> <current> <ideal> <threshold> <name>
                                Add an item
  inc <id> / dec <id>           One unit more / less
  adjust <id> <amount>          Add (or with a minus, remove) stock
  levels <id> <current> <ideal> <threshold>
                                Save all three levels
  step <id> <current|ideal|threshold> <+|->
                                Move one level by one
  history [page]                History, newest first
  admin                         Admin overview
  export <history|inventory> <csv|excel>
                                Write an export file
  lang <he|en>                  Switch language
  dark                          Toggle dark mode
  help                          This text
  quit                          Leave";

/// What a line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Quit,
}

/// Borrowed view of the app state the shell dispatches against.
pub struct Shell<'a> {
    pub inventory: &'a InventoryState,
    pub session: &'a SessionState,
    pub prefs: &'a PreferencesState,
    pub config: &'a AppConfig,
}

impl<'a> Shell<'a> {
    /// Reads lines until EOF or `quit`.
    ///
    /// After each line, items that have just dropped to their threshold are
    /// announced once.
    pub fn run<R: BufRead, W: Write>(&self, input: R, mut out: W) -> io::Result<()> {
        let mut items = self.inventory.with_store(|s| s.subscribe_items());
        let mut low = low_stock_ids(&items.borrow());

        writeln!(out, "{}", self.translator().t("app.title"))?;
        self.prompt(&mut out)?;

        for line in input.lines() {
            let line = line?;
            match self.dispatch(&line) {
                Ok(Reply::Quit) => break,
                Ok(Reply::Text(text)) if text.is_empty() => {}
                Ok(Reply::Text(text)) => writeln!(out, "{}", text)?,
                Err(e) => {
                    tracing::debug!(code = ?e.code, "Command failed");
                    writeln!(out, "error: {}", e.message)?;
                }
            }
            self.announce_low_stock(&mut items, &mut low, &mut out)?;
            self.prompt(&mut out)?;
        }
        Ok(())
    }

    fn announce_low_stock<W: Write>(
        &self,
        items: &mut watch::Receiver<Vec<InventoryItem>>,
        low: &mut HashSet<String>,
        out: &mut W,
    ) -> io::Result<()> {
        if !items.has_changed().unwrap_or(false) {
            return Ok(());
        }
        let current = items.borrow_and_update().clone();
        let label = self.translator().t("inventory.alerts.lowStock");
        for item in current
            .iter()
            .filter(|i| i.is_low_stock() && !low.contains(&i.id))
        {
            writeln!(
                out,
                "! {}: {} ({}/{})",
                label, item.name, item.current_stock, item.threshold
            )?;
        }
        *low = low_stock_ids(&current);
        Ok(())
    }

    fn prompt<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let prefs = preferences::get_preferences(self.prefs);
        write!(out, "stockroom [{}|{}]> ", prefs.language, prefs.direction)?;
        out.flush()
    }

    fn translator(&self) -> Translator {
        self.prefs.with_prefs(|p| p.translator())
    }

    /// Runs one line.
    pub fn dispatch(&self, line: &str) -> Result<Reply, ApiError> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((&command, args)) = words.split_first() else {
            return Ok(Reply::Text(String::new()));
        };
        let t = self.translator();

        let text = match command {
            "quit" | "exit" => return Ok(Reply::Quit),
            "help" => HELP.to_string(),

            "login" => {
                let [email, password] = args else {
                    return Err(usage("login <email> <password>"));
                };
                let user = auth::login(self.session, self.inventory, &t, email, password)?;
                format!("{} ({})", user.email, user.role)
            }
            "logout" => {
                auth::logout(self.session, self.inventory)?;
                t.t("login.title").to_string()
            }
            "whoami" => match auth::current_user(self.session) {
                Some(user) => format!("{} ({})", user.email, user.role),
                None => t.t("login.required").to_string(),
            },

            "stats" => {
                let stats = inventory::get_stats(self.session, self.inventory)?;
                format!(
                    "{}: {}\n{}: {}\n{}: {}",
                    t.t("inventory.dashboard.totalItems"),
                    stats.total_items,
                    t.t("inventory.dashboard.lowStock"),
                    stats.low_stock_count,
                    t.t("inventory.dashboard.categories"),
                    stats.category_count,
                )
            }
            "items" => {
                let groups =
                    inventory::grouped_items(self.session, self.inventory, &args.join(" "))?;
                let mut lines = Vec::new();
                for group in groups.iter().filter(|g| !g.items.is_empty()) {
                    lines.push(format!("# {} ({})", group.category_name, group.category_id));
                    lines.extend(group.items.iter().map(|item| item_line(item, &t)));
                }
                if lines.is_empty() {
                    t.t("inventory.items.noItems").to_string()
                } else {
                    lines.join("\n")
                }
            }
            "categories" => category::list_categories(self.session, self.inventory)?
                .iter()
                .map(|c| format!("{}  {}  {}", c.id, c.name, c.item_count))
                .collect::<Vec<_>>()
                .join("\n"),
            "add-category" => {
                let created = category::add_category(self.session, self.inventory, &args.join(" "))?;
                format!("{} {}", created.id, created.name)
            }
            "add-item" => {
                let [category, current, ideal, threshold, name @ ..] = args else {
                    return Err(usage(
                        "add-item <category-id> <current> <ideal> <threshold> <name>",
                    ));
                };
                let input = AddItemInput {
                    name: name.join(" "),
                    category: category.to_string(),
                    current_stock: parse_number("current", current)?,
                    ideal_stock: parse_number("ideal", ideal)?,
                    threshold: parse_number("threshold", threshold)?,
                };
                let item = inventory::add_item(self.session, self.inventory, input)?;
                item_line(&item, &t)
            }
            "inc" | "dec" => {
                let [id] = args else {
                    return Err(usage("inc|dec <id>"));
                };
                let item = if command == "inc" {
                    inventory::increment_stock(self.session, self.inventory, id)?
                } else {
                    inventory::decrement_stock(self.session, self.inventory, id)?
                };
                item_line(&item, &t)
            }
            "adjust" => {
                let [id, amount] = args else {
                    return Err(usage("adjust <id> <amount>"));
                };
                let amount = parse_number("amount", amount)?;
                let item = inventory::adjust_stock(self.session, self.inventory, id, amount)?;
                item_line(&item, &t)
            }
            "levels" => {
                let [id, current, ideal, threshold] = args else {
                    return Err(usage("levels <id> <current> <ideal> <threshold>"));
                };
                let levels = StockLevels::new(
                    parse_stock_input("current", current)?,
                    parse_stock_input("ideal", ideal)?,
                    parse_stock_input("threshold", threshold)?,
                );
                let item = inventory::save_levels(self.session, self.inventory, id, levels)?;
                format!("{}\n{}", t.t("inventory.alerts.settingsUpdated"), item_line(&item, &t))
            }
            "step" => {
                let [id, field, direction] = args else {
                    return Err(usage("step <id> <current|ideal|threshold> <+|->"));
                };
                let field: LevelField = field.parse().map_err(ApiError::validation)?;
                let up = match *direction {
                    "+" => true,
                    "-" => false,
                    _ => return Err(usage("step <id> <current|ideal|threshold> <+|->")),
                };
                let item = inventory::step_level(self.session, self.inventory, id, field, up)?;
                item_line(&item, &t)
            }

            "history" => {
                let page = match args.first() {
                    Some(raw) => raw
                        .parse::<usize>()
                        .ok()
                        .filter(|p| *p > 0)
                        .ok_or_else(|| usage("history [page]"))?,
                    None => 1,
                };
                let page = history::history_page(
                    self.session,
                    self.inventory,
                    self.prefs,
                    page - 1,
                    self.config.history_page_size,
                )?;
                let mut lines: Vec<String> = page
                    .rows
                    .iter()
                    .map(|r| {
                        format!(
                            "{} | {} | {} | {} | {}",
                            r.date, r.item_name, r.action, r.quantity, r.user
                        )
                    })
                    .collect();
                lines.push(page.range_label);
                lines.join("\n")
            }

            "admin" => {
                let overview = inventory::admin_overview(self.session, self.inventory)?;
                let mut lines = vec![
                    format!("# {}", t.t("inventory.admin.title")),
                    format!(
                        "{}: {}  {}: {}  {}: {}",
                        t.t("inventory.dashboard.totalItems"),
                        overview.stats.total_items,
                        t.t("inventory.dashboard.lowStock"),
                        overview.stats.low_stock_count,
                        t.t("inventory.dashboard.categories"),
                        overview.stats.category_count,
                    ),
                    format!("# {}", t.t("inventory.admin.allItems")),
                ];
                lines.extend(overview.items.iter().map(|item| item_line(item, &t)));
                lines.join("\n")
            }

            "export" => {
                let [what, format] = args else {
                    return Err(usage("export <history|inventory> <csv|excel>"));
                };
                let format: ExportFormat = format.parse().map_err(ApiError::validation)?;
                let written = match *what {
                    "history" => export::export_history(
                        self.session,
                        self.inventory,
                        self.prefs,
                        self.config,
                        format,
                    )?,
                    "inventory" => export::export_inventory(
                        self.session,
                        self.inventory,
                        self.prefs,
                        self.config,
                        format,
                    )?,
                    _ => return Err(usage("export <history|inventory> <csv|excel>")),
                };
                match written {
                    Some(path) => path.display().to_string(),
                    None => t.t("inventory.export.empty").to_string(),
                }
            }

            "lang" => {
                let [code] = args else {
                    return Err(usage("lang <he|en>"));
                };
                let language: Language = code.parse().map_err(ApiError::validation)?;
                let prefs = preferences::switch_language(self.prefs, language)?;
                format!("{} ({})", prefs.language, prefs.direction)
            }
            "dark" => {
                let prefs = preferences::toggle_dark_mode(self.prefs)?;
                let key = if prefs.dark_mode {
                    "app.darkMode"
                } else {
                    "app.lightMode"
                };
                self.translator().t(key).to_string()
            }

            other => return Err(ApiError::validation(format!("Unknown command: {}", other))),
        };

        Ok(Reply::Text(text))
    }
}

fn low_stock_ids(items: &[InventoryItem]) -> HashSet<String> {
    items
        .iter()
        .filter(|i| i.is_low_stock())
        .map(|i| i.id.clone())
        .collect()
}

fn usage(text: &str) -> ApiError {
    ApiError::validation(format!("usage: {}", text))
}

fn parse_number(field: &str, raw: &str) -> Result<f64, ApiError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| ApiError::validation(format!("{} must be a number", field)))
}

fn item_line(item: &ItemDto, t: &Translator) -> String {
    let status = match item.status {
        ItemStatus::Ok => t.t("inventory.status.ok"),
        ItemStatus::Low => t.t("inventory.status.low"),
    };
    format!(
        "{}  {}  {}/{} (min {})  [{}]",
        item.id, item.name, item.current_stock, item.ideal_stock, item.threshold, status
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_states;
    use crate::error::ErrorCode;
    use tempfile::TempDir;

    fn text(reply: Reply) -> String {
        match reply {
            Reply::Text(text) => text,
            Reply::Quit => panic!("unexpected quit"),
        }
    }

    #[test]
    fn test_session_flow() {
        let temp = TempDir::new().unwrap();
        let (inventory, session, prefs) = test_states();
        let config = AppConfig {
            export_dir: temp.path().to_path_buf(),
            ..AppConfig::default()
        };
        let shell = Shell {
            inventory: &inventory,
            session: &session,
            prefs: &prefs,
            config: &config,
        };

        text(shell.dispatch("lang en").unwrap());
        assert!(shell.dispatch("stats").is_err());

        let who = text(shell.dispatch("login tech@example.com tech123").unwrap());
        assert_eq!(who, "tech@example.com (technician)");

        let created = text(shell.dispatch("add-category Hand tools").unwrap());
        let category_id = created.split_whitespace().next().unwrap().to_string();

        let item = text(
            shell
                .dispatch(&format!("add-item {} 1 10 2 Claw hammer", category_id))
                .unwrap(),
        );
        assert!(item.contains("Claw hammer"));
        assert!(item.ends_with("[Low]"));
        let item_id = item.split_whitespace().next().unwrap().to_string();

        let adjusted = text(shell.dispatch(&format!("adjust {} 4", item_id)).unwrap());
        assert!(adjusted.contains("5/10"));

        let stepped = text(shell.dispatch(&format!("step {} threshold +", item_id)).unwrap());
        assert!(stepped.contains("(min 3)"));
        assert!(shell.dispatch(&format!("step {} bogus +", item_id)).is_err());

        let stats = text(shell.dispatch("stats").unwrap());
        assert!(stats.contains("Total Items: 1"));
        assert!(stats.contains("Low Stock: 0"));

        let history = text(shell.dispatch("history").unwrap());
        assert!(history.contains("Added"));
        assert!(history.ends_with("1 - 3 of 3"));

        assert!(shell.dispatch("admin").is_err());

        let exported = text(shell.dispatch("export inventory csv").unwrap());
        assert!(exported.ends_with(".csv"));

        assert_eq!(shell.dispatch("quit").unwrap(), Reply::Quit);
    }

    #[test]
    fn test_oversized_input_is_refused() {
        let (inventory, session, prefs) = test_states();
        let config = AppConfig::default();
        let shell = Shell {
            inventory: &inventory,
            session: &session,
            prefs: &prefs,
            config: &config,
        };
        text(shell.dispatch("lang en").unwrap());
        text(shell.dispatch("login tech@example.com tech123").unwrap());
        let created = text(shell.dispatch("add-category Bins").unwrap());
        let category_id = created.split_whitespace().next().unwrap().to_string();

        let err = shell
            .dispatch(&format!("add-item {} 1e30 1e30 0 Washers", category_id))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let stats = text(shell.dispatch("stats").unwrap());
        assert!(stats.contains("Total Items: 0"));

        shell
            .dispatch(&format!("add-item {} 1 5 0 Washers", category_id))
            .unwrap();
        let history = text(shell.dispatch("history 18446744073709551615").unwrap());
        assert!(!history.contains("Washers"));
        assert!(history.ends_with("of 1"));
    }

    #[test]
    fn test_run_prints_errors_and_continues() {
        let (inventory, session, prefs) = test_states();
        let config = AppConfig::default();
        let shell = Shell {
            inventory: &inventory,
            session: &session,
            prefs: &prefs,
            config: &config,
        };

        let input = "lang en\nbogus\nwhoami\nquit\nwhoami\n";
        let mut out = Vec::new();
        shell.run(input.as_bytes(), &mut out).unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("error: Unknown command: bogus"));
        assert_eq!(out.matches("Please log in first").count(), 1);
    }

    #[test]
    fn test_run_announces_low_stock_once() {
        let (inventory, session, prefs) = test_states();
        let config = AppConfig::default();
        let category = inventory
            .with_store_mut(|s| s.add_category(stockroom_core::NewCategory::named("Tools")))
            .unwrap();
        let shell = Shell {
            inventory: &inventory,
            session: &session,
            prefs: &prefs,
            config: &config,
        };

        let input = format!(
            "lang en\nlogin tech@example.com tech123\nadd-item {} 3 10 2 Pliers\n",
            category.id
        );
        let mut out = Vec::new();
        shell.run(input.as_bytes(), &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert_eq!(out.matches("! Low stock").count(), 0);

        let id = inventory.with_store(|s| s.items()[0].id.clone());
        let input = format!("dec {id}\ndec {id}\n");
        let mut out = Vec::new();
        shell.run(input.as_bytes(), &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert_eq!(out.matches("! Low stock: Pliers (2/2)").count(), 1);
    }
}
