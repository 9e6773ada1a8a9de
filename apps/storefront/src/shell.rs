//! # Storefront Shell
//!
//! Line-oriented front end over the commands: one command per line, parsed
//! with clap, rendered as plain text.
//!
//! ## Usage
//! ```text
//! products --search pro --max-price 1500
//! products --category "Phones"
//! categories
//! show 3
//! add 1
//! qty 1 3
//! inc 1 / dec 1
//! remove 1
//! login shopper@example.com
//! cart [--json]
//! logout / whoami / config / quit
//! ```
//!
//! Bad input and command errors are printed and the shell keeps reading.
//! Only I/O failures end the loop early.

use std::io::{BufRead, Write};

use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing::debug;

use crate::commands;
use crate::commands::cart::CartResponse;
use crate::commands::product::SearchRequest;
use crate::error::ApiError;
use crate::Storefront;
use techstore_core::{Product, ProductId};

/// Fatal shell errors.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// A line that could not be split into arguments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unterminated {0} quote")]
pub struct UnterminatedQuote(pub char);

#[derive(Parser, Debug)]
#[command(name = "techstore", no_binary_name = true)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum ShellCommand {
    /// List products, optionally filtered
    Products {
        /// Case-insensitive text to match in product names
        #[arg(short, long)]
        search: Option<String>,

        /// Category to show ("All" for every category)
        #[arg(short, long)]
        category: Option<String>,

        /// Price ceiling in whole dollars
        #[arg(short, long)]
        max_price: Option<i64>,
    },
    /// List product categories
    Categories,
    /// Show one product
    Show { id: u32 },
    /// Add one unit of a product to the cart
    Add { id: u32 },
    /// Set the quantity of a cart line
    #[command(allow_negative_numbers = true)]
    Qty { id: u32, quantity: i64 },
    /// Increase a cart line by one
    Inc { id: u32 },
    /// Decrease a cart line by one
    Dec { id: u32 },
    /// Remove a line from the cart
    Remove { id: u32 },
    /// Show the cart (requires sign-in)
    Cart {
        /// Print the cart as JSON
        #[arg(long)]
        json: bool,
    },
    /// Sign in with an email address
    Login { email: String },
    /// Sign out
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Show the storefront configuration
    Config,
    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

enum Flow {
    Continue,
    Quit,
}

/// Reads commands from `input` and writes results to `output`.
pub struct Shell<'a, R, W> {
    app: &'a Storefront,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(app: &'a Storefront, input: R, output: W) -> Self {
        Shell { app, input, output }
    }

    /// Runs until `quit` or end of input.
    pub fn run(mut self) -> Result<(), ShellError> {
        let mut line = String::new();
        loop {
            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(());
            }

            let tokens = match tokenize(&line) {
                Ok(tokens) if tokens.is_empty() => continue,
                Ok(tokens) => tokens,
                Err(err) => {
                    writeln!(self.output, "error: {}", err)?;
                    continue;
                }
            };

            let parsed = match ShellLine::try_parse_from(&tokens) {
                Ok(parsed) => parsed,
                Err(err) => {
                    writeln!(self.output, "{}", err.to_string().trim_end())?;
                    continue;
                }
            };

            debug!(command = ?parsed.command, "shell command");
            if let Flow::Quit = self.execute(parsed.command)? {
                return Ok(());
            }
        }
    }

    fn execute(&mut self, command: ShellCommand) -> Result<Flow, ShellError> {
        let app = self.app;

        match command {
            ShellCommand::Products {
                search,
                category,
                max_price,
            } => {
                let request = SearchRequest {
                    search,
                    category,
                    max_price,
                };
                match commands::product::search_products(&app.catalog, &app.config, &request) {
                    Ok(products) if products.is_empty() => {
                        writeln!(self.output, "No products found")?
                    }
                    Ok(products) => {
                        for product in &products {
                            self.write_product(product)?;
                        }
                    }
                    Err(err) => self.write_error(&err)?,
                }
            }
            ShellCommand::Categories => {
                for category in commands::product::list_categories(&app.catalog) {
                    writeln!(self.output, "{}", category)?;
                }
            }
            ShellCommand::Show { id } => {
                match commands::product::get_product(&app.catalog, ProductId::new(id)) {
                    Ok(product) => {
                        self.write_product(&product)?;
                        writeln!(self.output, "    {}", product.description)?;
                    }
                    Err(err) => self.write_error(&err)?,
                }
            }
            ShellCommand::Add { id } => {
                match commands::cart::add_to_cart(&app.catalog, &app.cart, ProductId::new(id)) {
                    Ok(cart) => self.write_summary(&cart)?,
                    Err(err) => self.write_error(&err)?,
                }
            }
            ShellCommand::Qty { id, quantity } => {
                match commands::cart::update_cart_item(&app.cart, ProductId::new(id), quantity) {
                    Ok(cart) => self.write_summary(&cart)?,
                    Err(err) => self.write_error(&err)?,
                }
            }
            ShellCommand::Inc { id } => {
                match commands::cart::increment_cart_item(&app.cart, ProductId::new(id)) {
                    Ok(cart) => self.write_summary(&cart)?,
                    Err(err) => self.write_error(&err)?,
                }
            }
            ShellCommand::Dec { id } => {
                let cart = commands::cart::decrement_cart_item(&app.cart, ProductId::new(id));
                self.write_summary(&cart)?;
            }
            ShellCommand::Remove { id } => {
                let cart = commands::cart::remove_from_cart(&app.cart, ProductId::new(id));
                self.write_summary(&cart)?;
            }
            ShellCommand::Cart { json } => match commands::cart::get_cart(&app.session, &app.cart) {
                Ok(cart) if json => {
                    writeln!(self.output, "{}", serde_json::to_string_pretty(&cart)?)?
                }
                Ok(cart) => self.write_cart(&cart)?,
                Err(err) => self.write_error(&err)?,
            },
            ShellCommand::Login { email } => match commands::session::login(&app.session, &email) {
                Ok(user) => writeln!(self.output, "Signed in as {}", user.email)?,
                Err(err) => self.write_error(&err)?,
            },
            ShellCommand::Logout => match commands::session::logout(&app.session) {
                Some(user) => writeln!(self.output, "Signed out {}", user.email)?,
                None => writeln!(self.output, "Not signed in")?,
            },
            ShellCommand::Whoami => match commands::session::current_user(&app.session) {
                Some(user) => writeln!(self.output, "{}", user.email)?,
                None => writeln!(self.output, "Not signed in")?,
            },
            ShellCommand::Config => {
                let config = commands::config::get_config(&app.config);
                writeln!(self.output, "{}", serde_json::to_string_pretty(&config)?)?;
            }
            ShellCommand::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    fn write_product(&mut self, product: &Product) -> Result<(), ShellError> {
        let stars = usize::from(product.full_stars());
        writeln!(
            self.output,
            "[{}] {} {} ({}) {}{} {:.1}",
            product.id,
            product.name,
            self.app.config.format_currency(product.price),
            product.category,
            "★".repeat(stars),
            "☆".repeat(5 - stars),
            product.rating
        )?;
        Ok(())
    }

    fn write_cart(&mut self, cart: &CartResponse) -> Result<(), ShellError> {
        if cart.items.is_empty() {
            writeln!(self.output, "Your cart is empty")?;
            return Ok(());
        }

        let config = &self.app.config;
        for line in &cart.items {
            writeln!(
                self.output,
                "[{}] {} x{} @ {} = {}",
                line.id,
                line.name,
                line.quantity,
                config.format_currency(line.price),
                config.format_currency(line.line_total())
            )?;
        }
        writeln!(self.output, "Total: {}", config.format_currency(cart.total))?;
        Ok(())
    }

    fn write_summary(&mut self, cart: &CartResponse) -> Result<(), ShellError> {
        writeln!(
            self.output,
            "Cart: {} item(s), total {}",
            cart.total_quantity,
            self.app.config.format_currency(cart.total)
        )?;
        Ok(())
    }

    fn write_error(&mut self, err: &ApiError) -> Result<(), ShellError> {
        writeln!(self.output, "error: {}", err)?;
        Ok(())
    }
}

/// Splits a line on whitespace. Single or double quotes group words.
pub fn tokenize(line: &str) -> Result<Vec<String>, UnterminatedQuote> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_token = true;
            }
            None if c.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            None => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if let Some(q) = quote {
        return Err(UnterminatedQuote(q));
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ConfigState;
    use std::io::Cursor;

    fn run_script(app: &Storefront, script: &str) -> String {
        let mut output = Vec::new();
        Shell::new(app, Cursor::new(script), &mut output)
            .run()
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(tokenize("  add   1 \n").unwrap(), vec!["add", "1"]);
        assert_eq!(
            tokenize(r#"products --search "galaxy s24""#).unwrap(),
            vec!["products", "--search", "galaxy s24"]
        );
        assert_eq!(tokenize("login ''").unwrap(), vec!["login", ""]);
        assert_eq!(tokenize("   ").unwrap(), Vec::<String>::new());
        assert_eq!(tokenize("show 'x"), Err(UnterminatedQuote('\'')));
    }

    #[test]
    fn test_parse_commands() {
        let parsed = ShellLine::try_parse_from(["qty", "1", "-2"]).unwrap();
        assert_eq!(parsed.command, ShellCommand::Qty { id: 1, quantity: -2 });

        let parsed =
            ShellLine::try_parse_from(["products", "--category", "Phones", "--max-price", "900"])
                .unwrap();
        assert_eq!(
            parsed.command,
            ShellCommand::Products {
                search: None,
                category: Some("Phones".to_string()),
                max_price: Some(900),
            }
        );

        assert!(ShellLine::try_parse_from(["add"]).is_err());
        assert!(ShellLine::try_parse_from(["fly"]).is_err());
    }

    #[test]
    fn test_shopping_session() {
        let app = Storefront::new(ConfigState::default());
        let output = run_script(
            &app,
            "add 1\nadd 4\nadd 1\ncart\nlogin shopper@example.com\ncart\nquit\nadd 2\n",
        );

        assert!(output.contains("Cart: 3 item(s), total $2247.00"));
        assert!(output.contains("error: [Unauthorized] Sign in to view your cart"));
        assert!(output.contains("Signed in as shopper@example.com"));
        assert!(output.contains("[1] iPhone 15 Pro x2 @ $999.00 = $1998.00"));
        assert!(output.contains("[4] AirPods Pro x1 @ $249.00 = $249.00"));
        assert!(output.contains("Total: $2247.00"));

        // Nothing after quit runs.
        assert_eq!(app.cart.read().item_count(), 2);
    }

    #[test]
    fn test_quantity_controls() {
        let app = Storefront::new(ConfigState::default());
        let output = run_script(&app, "add 3\ninc 3\nqty 3 5\nqty 3 0\ndec 3\nremove 3\n");

        let summaries: Vec<&str> = output.lines().collect();
        assert_eq!(
            summaries,
            vec![
                "Cart: 1 item(s), total $1299.00",
                "Cart: 2 item(s), total $2598.00",
                "Cart: 5 item(s), total $6495.00",
                "Cart: 5 item(s), total $6495.00",
                "Cart: 4 item(s), total $5196.00",
                "Cart: 0 item(s), total $0.00",
            ]
        );
    }

    #[test]
    fn test_product_listing() {
        let app = Storefront::new(ConfigState::default());
        let output = run_script(&app, "products --search 'galaxy' \nproducts -c Laptops -m 100\n");

        assert!(output.contains("[2] Samsung Galaxy S24 $899.00 (Phones) ★★★★☆ 4.7"));
        assert!(output.contains("No products found"));
    }

    #[test]
    fn test_errors_do_not_stop_the_shell() {
        let app = Storefront::new(ConfigState::default());
        let output = run_script(&app, "add 99\nlogin nobody\nshow 'oops\nfly\ncategories\n");

        assert!(output.contains("error: [NotFound] Product not found: 99"));
        assert!(output.contains("error: [ValidationError]"));
        assert!(output.contains("error: unterminated ' quote"));
        assert!(output.contains("Accessories"));
    }

    #[test]
    fn test_oversized_quantity_is_rejected_and_shell_continues() {
        let app = Storefront::new(ConfigState::default());
        let output = run_script(
            &app,
            "add 1\nqty 1 9223372036854775807\nqty 1 1000\nqty 1 999\ninc 1\ncategories\n",
        );

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "Cart: 1 item(s), total $999.00");
        assert_eq!(lines[1], "error: [ValidationError] quantity must be between 1 and 999");
        assert_eq!(lines[2], lines[1]);
        assert_eq!(lines[3], "Cart: 999 item(s), total $998001.00");
        assert_eq!(lines[4], lines[1]);
        assert_eq!(lines[5], "All");
        assert_eq!(app.cart.read().total_quantity(), 999);
    }

    #[test]
    fn test_cart_json() {
        let app = Storefront::new(ConfigState::default());
        let output = run_script(&app, "login a@b.co\nadd 4\ncart --json\n");

        let json_start = output.find('{').unwrap();
        let json: serde_json::Value = serde_json::from_str(&output[json_start..]).unwrap();
        assert_eq!(json["total"], 24900);
        assert_eq!(json["items"][0]["name"], "AirPods Pro");
    }
}
