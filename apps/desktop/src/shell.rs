//! # Terminal Shell
//!
//! Line-oriented front end over the [`Controller`]. One command per line;
//! each is parsed into a [`Command`], executed, and the relevant part of the
//! snapshot is printed.
//!
//! ## Commands
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  products                      list the catalog                         │
//! │  product add                   prompt for fields, create                │
//! │  product edit <id>             prompt with current values, update       │
//! │  product delete <id>           delete                                   │
//! │  barcode <id>                  preview size, then save the label        │
//! │                                                                         │
//! │  bill add <id-or-name> [qty]   add to the bill in progress              │
//! │  bill remove <productId>       drop a line                              │
//! │  bill discount <amount>        flat discount                            │
//! │  bill pay <method>             Cash | GPay | Card | Other               │
//! │  bill show                     lines and totals                         │
//! │  bill finalize                 submit, show the invoice                 │
//! │                                                                         │
//! │  history                       finalized bills, newest first            │
//! │  invoice <billId>              print a bill from history                │
//! │  view <name>                   products | billing | history | invoice   │
//! │  help, quit                                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt::Write as _;
use std::io::{self, BufRead, Write};

use shopfront_api::Backend;
use shopfront_core::validation::ProductForm;
use shopfront_core::{OTHER_CATEGORY, PREDEFINED_CATEGORIES};
use tracing::debug;

use crate::commands::Controller;
use crate::error::AppError;
use crate::state::{AppSnapshot, ConfigState, View};

pub const HELP: &str = "\
Commands:
  products                      list products
  product add                   add a product
  product edit <id>             edit a product
  product delete <id>           delete a product
  barcode <id>                  export a barcode label
  bill add <id-or-name> [x<qty>|--qty <qty>]
                                add to the current bill
  bill remove <productId>       remove a line
  bill discount <amount>        set a flat discount
  bill pay <method>             Cash, GPay, Card or Other
  bill show                     show the current bill
  bill finalize                 finalize and print the invoice
  history                       list finalized bills
  invoice <billId>              print an invoice from history
  view <name>                   products, billing, history or invoice
  help                          this text
  quit                          exit";

// =============================================================================
// Parsing
// =============================================================================

/// A parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Products,
    ProductAdd,
    ProductEdit(String),
    ProductDelete(String),
    Barcode(String),
    BillAdd { identifier: String, quantity: String },
    BillRemove(String),
    BillDiscount(String),
    BillPay(String),
    BillShow,
    BillFinalize,
    History,
    Invoice(String),
    View(View),
    Help,
    Quit,
}

/// Parses one line. Blank lines are `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, AppError> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some((&head, rest)) = words.split_first() else {
        return Ok(None);
    };

    let command = match (head.to_lowercase().as_str(), rest) {
        ("products", []) => Command::Products,
        ("product", ["add"]) => Command::ProductAdd,
        ("product", ["edit", id @ ..]) if !id.is_empty() => Command::ProductEdit(id.join(" ")),
        ("product", ["delete", id @ ..]) if !id.is_empty() => {
            Command::ProductDelete(id.join(" "))
        }
        ("barcode", id @ [_, ..]) => Command::Barcode(id.join(" ")),
        ("bill", ["add", args @ ..]) if !args.is_empty() => parse_bill_add(args),
        ("bill", ["remove", id @ ..]) if !id.is_empty() => Command::BillRemove(id.join(" ")),
        ("bill", ["discount", amount]) => Command::BillDiscount(amount.to_string()),
        ("bill", ["pay", method]) => Command::BillPay(method.to_string()),
        ("bill", ["show"]) | ("bill", []) => Command::BillShow,
        ("bill", ["finalize"]) => Command::BillFinalize,
        ("history", []) => Command::History,
        ("invoice", id @ [_, ..]) => Command::Invoice(id.join(" ")),
        ("view", [name]) => Command::View(name.parse()?),
        ("help", _) | ("?", _) => Command::Help,
        ("quit", []) | ("exit", []) => Command::Quit,
        _ => {
            return Err(AppError::usage(format!(
                "Unrecognized command: '{}'. Type `help` for the list.",
                line.trim()
            )))
        }
    };
    Ok(Some(command))
}

/// `bill add Levis 501 x2` or `bill add Levis 501 --qty 2`.
///
/// The quantity needs its marker; without one every word belongs to the
/// identifier and the quantity is 1.
fn parse_bill_add(args: &[&str]) -> Command {
    let marked = |w: &str| {
        w.strip_prefix(['x', 'X'])
            .filter(|q| q.starts_with(|c: char| c.is_ascii_digit() || c == '-'))
            .map(str::to_string)
    };

    let (identifier, quantity) = match args {
        [init @ .., "--qty", qty] if !init.is_empty() => (init.join(" "), qty.to_string()),
        [init @ .., last] if !init.is_empty() && marked(*last).is_some() => {
            (init.join(" "), marked(*last).unwrap_or_default())
        }
        _ => (args.join(" "), "1".to_string()),
    };
    Command::BillAdd {
        identifier,
        quantity,
    }
}

// =============================================================================
// Rendering
// =============================================================================

pub fn render_products(snapshot: &AppSnapshot, config: &ConfigState) -> String {
    if snapshot.products.is_empty() {
        return "No products yet. Use `product add`.".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<12} {:<24} {:<14} {:>12}  {:<16} {}",
        "ID", "Name", "Category", "Price", "Colors", "Sizes"
    );
    for p in &snapshot.products {
        let _ = writeln!(
            out,
            "{:<12} {:<24} {:<14} {:>12}  {:<16} {}",
            p.id,
            p.name,
            p.category,
            config.format_currency(p.price),
            p.colors,
            p.sizes
        );
    }
    out.trim_end().to_string()
}

pub fn render_bill(snapshot: &AppSnapshot, config: &ConfigState) -> String {
    let mut out = String::new();
    if snapshot.bill_items.is_empty() {
        out.push_str("Bill is empty.\n");
    } else {
        let _ = writeln!(
            out,
            "{:<12} {:<24} {:>5} {:>12} {:>12}",
            "ID", "Product", "Qty", "Price", "Total"
        );
        for item in &snapshot.bill_items {
            let _ = writeln!(
                out,
                "{:<12} {:<24} {:>5} {:>12} {:>12}",
                item.product_id,
                item.product_name,
                item.quantity,
                config.format_currency(item.price),
                config.format_currency(item.line_total())
            );
        }
    }

    let totals = &snapshot.totals;
    let _ = writeln!(out, "Subtotal:    {}", config.format_currency(totals.sub_total));
    let _ = writeln!(
        out,
        "Discount:    {} ({}%)",
        config.format_currency(totals.discount),
        totals.discount_percentage
    );
    let _ = writeln!(out, "Grand Total: {}", config.format_currency(totals.grand_total));
    let _ = write!(out, "Payment:     {}", snapshot.payment_method.label());
    out
}

pub fn render_history(snapshot: &AppSnapshot, config: &ConfigState) -> String {
    if snapshot.history.is_empty() {
        return "No bills yet.".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<14} {:<17} {:>6} {:>12}  {}",
        "Bill", "Date", "Lines", "Total", "Payment"
    );
    for bill in &snapshot.history {
        let _ = writeln!(
            out,
            "{:<14} {:<17} {:>6} {:>12}  {}",
            bill.id,
            bill.created_at.format("%Y-%m-%d %H:%M"),
            bill.item_count(),
            config.format_currency(bill.grand_total),
            bill.payment_method
        );
    }
    out.trim_end().to_string()
}

// =============================================================================
// Shell
// =============================================================================

/// Whether the loop keeps going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Reads commands from stdin until `quit` or EOF.
pub struct Shell<B: Backend> {
    controller: Controller<B>,
}

impl<B: Backend> Shell<B> {
    pub fn new(controller: Controller<B>) -> Self {
        Shell { controller }
    }

    pub fn controller(&self) -> &Controller<B> {
        &self.controller
    }

    pub fn into_controller(self) -> Controller<B> {
        self.controller
    }

    /// Runs the read-eval-print loop.
    pub async fn run(&mut self) -> io::Result<()> {
        println!(
            "{} Billing. Type `help` for commands.",
            self.controller.config().shop_name
        );
        if let Some(banner) = &self.controller.snapshot().api_error {
            println!("! Failed to load initial data: {}", banner);
        }

        loop {
            let prompt = format!("{}> ", self.controller.snapshot().view);
            let Some(line) = read_line(prompt).await? else {
                break;
            };

            let command = match parse_command(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(e) => {
                    println!("{}", e);
                    continue;
                }
            };

            debug!(?command, "Shell command");
            match self.execute(command).await {
                Ok(Flow::Quit) => break,
                Ok(Flow::Continue) => {}
                Err(e) => println!("{}", e),
            }
        }

        println!("Goodbye.");
        Ok(())
    }

    /// Executes one command and prints its result.
    pub async fn execute(&mut self, command: Command) -> Result<Flow, AppError> {
        let config = self.controller.config().clone();

        match command {
            Command::Products => {
                self.controller.navigate(View::Products)?;
                println!("{}", render_products(&self.controller.snapshot(), &config));
            }
            Command::ProductAdd => {
                self.controller.cancel_edit();
                let Some(form) = prompt_product_form(ProductForm::default()).await? else {
                    println!("Canceled.");
                    return Ok(Flow::Continue);
                };
                let product = self.controller.save_product(form).await?;
                println!("Added {} ({})", product.name, product.id);
            }
            Command::ProductEdit(id) => {
                let current = self.controller.edit_product(&id)?.clone();
                let Some(form) = prompt_product_form(current).await? else {
                    self.controller.cancel_edit();
                    println!("Canceled.");
                    return Ok(Flow::Continue);
                };
                let product = self.controller.save_product(form).await?;
                println!("Updated {} ({})", product.name, product.id);
            }
            Command::ProductDelete(id) => {
                let answer = read_line(format!("Delete product {}? [y/N] ", id))
                    .await
                    .map_err(io_error)?
                    .unwrap_or_default();
                if answer.trim().eq_ignore_ascii_case("y") {
                    self.controller.delete_product(&id).await?;
                    println!("Deleted {}", id);
                }
            }
            Command::Barcode(id) => {
                let label = self.controller.render_label(&id)?;
                let (w, h) = label.surface().bounding_box();
                println!(
                    "Barcode {}: preview {}x{} ({} bytes SVG), label {}x{}",
                    id,
                    w,
                    h,
                    label.surface().to_svg().len(),
                    label.width(),
                    label.height()
                );
                let response = self.controller.export_label(&label).await?;
                if let Some(status) = self.controller.snapshot().export_status {
                    println!("{}", status);
                }
                debug!(success = response.success, "Barcode export finished");
            }
            Command::BillAdd {
                identifier,
                quantity,
            } => {
                self.controller.navigate(View::Billing)?;
                let item = self.controller.add_item(&identifier, &quantity)?;
                println!("{} x{}", item.product_name, item.quantity);
            }
            Command::BillRemove(id) => {
                self.controller.remove_item(&id);
                println!("{}", render_bill(&self.controller.snapshot(), &config));
            }
            Command::BillDiscount(amount) => {
                self.controller.set_discount(&amount)?;
                println!("{}", render_bill(&self.controller.snapshot(), &config));
            }
            Command::BillPay(method) => {
                let method = self.controller.set_payment_method(&method)?;
                println!("Payment method: {}", method.label());
            }
            Command::BillShow => {
                self.controller.navigate(View::Billing)?;
                println!("{}", render_bill(&self.controller.snapshot(), &config));
            }
            Command::BillFinalize => {
                self.controller.finalize_bill().await?;
                if let Some(text) = self.controller.invoice_text() {
                    println!("{}", text);
                }
            }
            Command::History => {
                self.controller.navigate(View::History)?;
                println!("{}", render_history(&self.controller.snapshot(), &config));
            }
            Command::Invoice(id) => {
                self.controller.preview_invoice(&id)?;
                if let Some(text) = self.controller.invoice_text() {
                    println!("{}", text);
                }
            }
            Command::View(view) => {
                self.controller.navigate(view)?;
                let snapshot = self.controller.snapshot();
                let body = match view {
                    View::Products => render_products(&snapshot, &config),
                    View::Billing => render_bill(&snapshot, &config),
                    View::History => render_history(&snapshot, &config),
                    View::InvoicePreview => self.controller.invoice_text().unwrap_or_default(),
                };
                println!("{}", body);
            }
            Command::Help => println!("{}", HELP),
            Command::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }
}

// =============================================================================
// Input
// =============================================================================

/// Prints `prompt` and reads one line off the runtime. `None` on EOF.
///
/// Uses the same blocking stdin as the terminal save prompt so the two never
/// split buffered input between them.
async fn read_line(prompt: String) -> io::Result<Option<String>> {
    tokio::task::spawn_blocking(move || -> io::Result<Option<String>> {
        let mut stdout = io::stdout();
        stdout.write_all(prompt.as_bytes())?;
        stdout.flush()?;

        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        Ok((read > 0).then(|| line.trim_end_matches(['\r', '\n']).to_string()))
    })
    .await
    .map_err(io::Error::other)?
}

fn io_error(err: io::Error) -> AppError {
    AppError::usage(format!("Input error: {}", err))
}

/// Asks for one field; Enter keeps `current`. `None` on EOF.
async fn ask(label: &str, current: &str) -> Result<Option<String>, AppError> {
    let prompt = if current.is_empty() {
        format!("{}: ", label)
    } else {
        format!("{} [{}]: ", label, current)
    };
    let answer = read_line(prompt).await.map_err(io_error)?;
    Ok(answer.map(|a| {
        let a = a.trim();
        if a.is_empty() {
            current.to_string()
        } else {
            a.to_string()
        }
    }))
}

/// Walks through the product fields. `None` if input ends midway.
async fn prompt_product_form(mut form: ProductForm) -> Result<Option<ProductForm>, AppError> {
    let Some(name) = ask("Name", &form.name).await? else {
        return Ok(None);
    };
    form.name = name;

    println!("{}", category_menu());
    let current = if form.category == OTHER_CATEGORY {
        form.other_category.clone()
    } else {
        form.category.clone()
    };
    let Some(answer) = ask("Category (number or name)", &current).await? else {
        return Ok(None);
    };
    let (category, other) = resolve_category_answer(&answer);
    form.category = category;
    form.other_category = other;
    if form.category == OTHER_CATEGORY && form.other_category.is_empty() {
        let Some(name) = ask("New category name", "").await? else {
            return Ok(None);
        };
        form.other_category = name;
    }

    for (label, field) in [
        ("Price", &mut form.price),
        ("Colors", &mut form.colors),
        ("Sizes", &mut form.sizes),
    ] {
        let Some(value) = ask(label, field).await? else {
            return Ok(None);
        };
        *field = value;
    }

    Ok(Some(form))
}

fn category_menu() -> String {
    let mut out = String::new();
    for (i, category) in PREDEFINED_CATEGORIES.iter().enumerate() {
        let _ = write!(out, "{:>2}. {:<14}", i + 1, category);
        if (i + 1) % 4 == 0 {
            out.push('\n');
        }
    }
    let _ = write!(out, "{:>2}. {}", PREDEFINED_CATEGORIES.len() + 1, OTHER_CATEGORY);
    out
}

/// Maps a category answer to `(category, other_category)`.
///
/// A menu number or predefined name (any case) selects it; "Other..." or
/// its number asks for a custom name; any other text is the custom name.
pub fn resolve_category_answer(answer: &str) -> (String, String) {
    let answer = answer.trim();
    if answer.is_empty() {
        return (String::new(), String::new());
    }

    if let Ok(n) = answer.parse::<usize>() {
        if (1..=PREDEFINED_CATEGORIES.len()).contains(&n) {
            return (PREDEFINED_CATEGORIES[n - 1].to_string(), String::new());
        }
        if n == PREDEFINED_CATEGORIES.len() + 1 {
            return (OTHER_CATEGORY.to_string(), String::new());
        }
    }

    if answer.eq_ignore_ascii_case(OTHER_CATEGORY) || answer.eq_ignore_ascii_case("other") {
        return (OTHER_CATEGORY.to_string(), String::new());
    }

    match PREDEFINED_CATEGORIES
        .iter()
        .find(|c| c.eq_ignore_ascii_case(answer))
    {
        Some(category) => (category.to_string(), String::new()),
        None => (OTHER_CATEGORY.to_string(), answer.to_string()),
    }
}
