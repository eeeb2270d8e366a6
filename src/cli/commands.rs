use chrono::Utc;
use strsim::levenshtein;

use crate::analysis::{category_totals, trend_series};
use crate::cli::output;
use crate::cli::{CliMode, CommandError, LoopControl};
use crate::domain::{Category, Expense};
use crate::ingest::{MockScanner, ReceiptScanner};
use crate::tracker::Tracker;

const COMMANDS: [&str; 10] = [
    "add", "scan", "list", "stats", "insights", "trend", "budget", "seed", "help", "exit",
];

const DEFAULT_TREND_DAYS: u32 = 7;
const MAX_TREND_DAYS: u32 = 365;
const SUGGESTION_DISTANCE: usize = 3;

pub struct ShellContext {
    pub tracker: Tracker,
    pub mode: CliMode,
    pub running: bool,
    scanner: Box<dyn ReceiptScanner>,
}

impl ShellContext {
    pub fn new(tracker: Tracker, mode: CliMode) -> Self {
        // Script runs skip the simulated OCR latency so piped sessions stay fast.
        let scanner: Box<dyn ReceiptScanner> = match mode {
            CliMode::Interactive => Box::new(MockScanner::new()),
            CliMode::Script => Box::new(MockScanner::instant()),
        };
        Self {
            tracker,
            mode,
            running: true,
            scanner,
        }
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        COMMANDS.to_vec()
    }

    pub fn prompt(&self) -> String {
        "expense> ".to_string()
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        match command {
            "add" => self.cmd_add(args)?,
            "scan" => self.cmd_scan(args)?,
            "list" => self.cmd_list(args)?,
            "stats" => self.render_stats(),
            "insights" => self.render_insights(),
            "trend" => self.cmd_trend(args)?,
            "budget" => self.cmd_budget(args)?,
            "seed" => self.cmd_seed()?,
            "help" => render_help(),
            "exit" | "quit" => return Ok(LoopControl::Exit),
            unknown => {
                output::error(format!("Unknown command `{unknown}`."));
                self.suggest(unknown);
            }
        }
        Ok(LoopControl::Continue)
    }

    fn suggest(&self, input: &str) {
        let mut candidates: Vec<(usize, &str)> = COMMANDS
            .iter()
            .map(|name| (levenshtein(name, input), *name))
            .collect();
        candidates.sort_by_key(|(distance, _)| *distance);
        if let Some((distance, best)) = candidates.first() {
            if *distance <= SUGGESTION_DISTANCE {
                output::info(format!("Did you mean `{best}`?"));
            }
        }
    }

    fn cmd_add(&mut self, args: &[&str]) -> Result<(), CommandError> {
        if args.len() < 2 {
            return Err(CommandError::InvalidArguments(
                "Usage: add <amount> <category> [description...]".into(),
            ));
        }
        let description = if args.len() > 2 {
            args[2..].join(" ")
        } else {
            String::new()
        };
        let expense = self.tracker.add_manual(args[0], args[1], &description)?;
        output::success(format!(
            "Expense added: ${:.2} ({})",
            expense.amount,
            expense.category.display_name()
        ));
        self.render_after_mutation();
        Ok(())
    }

    fn cmd_scan(&mut self, args: &[&str]) -> Result<(), CommandError> {
        let [filename] = args else {
            return Err(CommandError::InvalidArguments("Usage: scan <file>".into()));
        };
        if self.mode == CliMode::Interactive {
            output::info("Processing receipt...");
        }
        // Blocks until the scan finishes; only one ingestion can ever be in
        // flight because the shell owns the single upload surface.
        let expense = self.tracker.ingest_receipt(self.scanner.as_ref(), filename)?;
        let confidence = expense.confidence.unwrap_or(0.0);
        output::success(format!(
            "Receipt processed: ${:.2} at {} ({:.1}% confidence)",
            expense.amount,
            expense.merchant.as_deref().unwrap_or("unknown merchant"),
            confidence * 100.0
        ));
        self.render_after_mutation();
        Ok(())
    }

    fn cmd_list(&mut self, args: &[&str]) -> Result<(), CommandError> {
        let expenses: Vec<&Expense> = match args {
            [] => self.tracker.expenses().all().iter().collect(),
            [category] => {
                let category = Category::parse(category)?;
                self.tracker.expenses().by_category(category).collect()
            }
            _ => {
                return Err(CommandError::InvalidArguments(
                    "Usage: list [category]".into(),
                ))
            }
        };

        if expenses.is_empty() {
            output::info("No expenses found.");
            return Ok(());
        }
        for expense in expenses {
            render_expense(expense);
        }
        Ok(())
    }

    fn cmd_trend(&mut self, args: &[&str]) -> Result<(), CommandError> {
        let days = match args {
            [] => DEFAULT_TREND_DAYS,
            [value] => value.parse::<u32>().map_err(|_| {
                CommandError::InvalidArguments("Usage: trend [days]".into())
            })?,
            _ => return Err(CommandError::InvalidArguments("Usage: trend [days]".into())),
        };
        if days == 0 {
            return Err(CommandError::InvalidArguments(
                "Trend window must cover at least one day.".into(),
            ));
        }
        if days > MAX_TREND_DAYS {
            return Err(CommandError::InvalidArguments(format!(
                "Trend window is capped at {MAX_TREND_DAYS} days."
            )));
        }
        let reference = Utc::now().date_naive();
        output::section(&format!("Daily spending, last {days} days"));
        for point in trend_series(self.tracker.expenses().all(), days, reference) {
            println!("  {:<8} ${:.2}", point.label, point.total);
        }
        Ok(())
    }

    fn cmd_budget(&mut self, args: &[&str]) -> Result<(), CommandError> {
        match args {
            [] | ["show"] => {
                self.render_budget();
                Ok(())
            }
            ["set", "monthly", amount] => {
                let monthly = parse_limit(amount)?;
                let mut budget = self.tracker.budget().clone();
                budget.monthly = monthly;
                self.tracker.set_budget(budget)?;
                output::success(format!("Monthly budget set to ${monthly:.2}."));
                self.render_after_mutation();
                Ok(())
            }
            ["set", category, amount] => {
                let category = Category::parse(category)?;
                let limit = parse_limit(amount)?;
                let mut budget = self.tracker.budget().clone();
                budget.set_limit(category, limit);
                self.tracker.set_budget(budget)?;
                output::success(format!(
                    "{} budget set to ${limit:.2}.",
                    category.display_name()
                ));
                self.render_after_mutation();
                Ok(())
            }
            _ => Err(CommandError::InvalidArguments(
                "Usage: budget [show] | budget set monthly <amount> | budget set <category> <amount>"
                    .into(),
            )),
        }
    }

    fn cmd_seed(&mut self) -> Result<(), CommandError> {
        if self.tracker.seed_sample_data()? {
            output::success("Sample expenses loaded.");
            self.render_after_mutation();
        } else {
            output::info("Store is not empty; nothing seeded.");
        }
        Ok(())
    }

    fn render_budget(&self) {
        let budget = self.tracker.budget();
        output::section("Budget");
        if budget.has_monthly() {
            println!("  Monthly: ${:.2}", budget.monthly);
        } else {
            println!("  Monthly: not set");
        }
        let totals = category_totals(self.tracker.expenses().all());
        for (&category, &limit) in &budget.categories {
            let spent = totals.get(category).unwrap_or(0.0);
            println!(
                "  {:<16} ${spent:.2} of ${limit:.2}",
                category.display_name()
            );
        }
    }

    fn render_stats(&self) {
        let stats = self.tracker.stats(Utc::now());
        output::section("Stats");
        println!("  Total spent:  ${:.2}", stats.total_spent);
        println!("  Budget used:  {:.1}%", stats.budget_used_pct);
        println!("  Insights:     {}", stats.insight_count);
    }

    fn render_insights(&self) {
        let insights = self.tracker.insights(Utc::now());
        output::section("Insights");
        if insights.is_empty() {
            output::info("Add some expenses to get spending insights.");
            return;
        }
        for item in &insights {
            output::insight(item);
        }
    }

    /// Every mutation re-derives and re-renders the aggregate views.
    fn render_after_mutation(&self) {
        self.render_stats();
        self.render_insights();
    }
}

fn parse_limit(text: &str) -> Result<f64, CommandError> {
    let value: f64 = text.parse().map_err(|_| {
        CommandError::InvalidArguments(format!("`{text}` is not a valid amount."))
    })?;
    if !value.is_finite() || value < 0.0 {
        return Err(CommandError::InvalidArguments(format!(
            "`{text}` is not a valid amount."
        )));
    }
    Ok(value)
}

fn render_expense(expense: &Expense) {
    let merchant = expense
        .merchant
        .as_deref()
        .unwrap_or(expense.category.display_name());
    let marker = if expense.is_ocr() { " [scanned]" } else { "" };
    println!(
        "  {}  ${:<9.2} {}  ({merchant}){marker}",
        expense.date.format("%Y-%m-%d"),
        expense.amount,
        expense.description,
    );
}

fn render_help() {
    output::section("Commands");
    println!("  add <amount> <category> [description...]   Record a manual expense");
    println!("  scan <file>                                Ingest a receipt");
    println!("  list [category]                            Show expenses, newest first");
    println!("  stats                                      Headline figures");
    println!("  insights                                   Rule-based spending advice");
    println!("  trend [days]                               Daily spending series");
    println!("  budget [show]                              Show the configured budget");
    println!("  budget set monthly <amount>                Set the monthly ceiling");
    println!("  budget set <category> <amount>             Set a category ceiling");
    println!("  seed                                       Load sample data when empty");
    println!("  exit                                       Leave the shell");
    println!();
    println!(
        "  Categories: {}",
        Category::ALL
            .iter()
            .map(|c| c.key())
            .collect::<Vec<_>>()
            .join(", ")
    );
}
