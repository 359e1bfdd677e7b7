// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_args() -> [Arg; 2] {
    [
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print as JSON lines"),
    ]
}

fn id_arg() -> Arg {
    Arg::new("id")
        .long("id")
        .required(true)
        .help("Id or unique id prefix")
}

fn period_arg() -> Arg {
    Arg::new("period")
        .long("period")
        .value_parser(["day", "week", "month"])
        .default_value("month")
        .help("Reporting window; month follows the configured start day")
}

fn type_arg(required: bool) -> Arg {
    Arg::new("type")
        .long("type")
        .value_parser(["income", "expense"])
        .required(required)
}

pub fn build_cli() -> Command {
    Command::new("moneystreak")
        .about("Personal finance tracker: budgets, savings streaks, debts, subscriptions and a cooling-off wishlist")
        .version(clap::crate_version!())
        .subcommand(Command::new("init").about("Create the data file and seed default categories"))
        .subcommand(settings_cmd())
        .subcommand(category_cmd())
        .subcommand(tx_cmd())
        .subcommand(
            Command::new("summary")
                .about("Income, expense and balance for the current window")
                .arg(period_arg())
                .args(json_args()),
        )
        .subcommand(report_cmd())
        .subcommand(budget_cmd())
        .subcommand(streak_cmd())
        .subcommand(debt_cmd())
        .subcommand(sub_cmd())
        .subcommand(wish_cmd())
        .subcommand(
            Command::new("export")
                .about("Export data")
                .subcommand(
                    Command::new("transactions")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .value_parser(["csv", "json"])
                                .default_value("csv"),
                        )
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
}

fn settings_cmd() -> Command {
    Command::new("settings")
        .about("Show or change user settings")
        .subcommand(Command::new("show").args(json_args()))
        .subcommand(
            Command::new("set")
                .arg(Arg::new("currency").long("currency"))
                .arg(
                    Arg::new("start_day")
                        .long("start-day")
                        .value_parser(value_parser!(u32))
                        .help("Day of month the fiscal month starts on (1-28)"),
                )
                .arg(
                    Arg::new("theme")
                        .long("theme")
                        .value_parser(["light", "dark", "system"]),
                )
                .arg(
                    Arg::new("accent")
                        .long("accent")
                        .value_parser(["blue", "green", "violet", "orange", "red"]),
                ),
        )
}

fn category_cmd() -> Command {
    Command::new("category")
        .about("Manage categories")
        .subcommand(
            Command::new("add")
                .arg(Arg::new("name").long("name").required(true))
                .arg(type_arg(true)),
        )
        .subcommand(
            Command::new("list")
                .arg(type_arg(false))
                .arg(
                    Arg::new("all")
                        .long("all")
                        .action(ArgAction::SetTrue)
                        .help("Include hidden categories"),
                )
                .args(json_args()),
        )
        .subcommand(Command::new("hide").about("Toggle visibility").arg(id_arg()))
        .subcommand(
            Command::new("rename")
                .arg(id_arg())
                .arg(Arg::new("name").long("name").required(true)),
        )
        .subcommand(Command::new("seed").about("Install default categories if none exist"))
}

fn tx_cmd() -> Command {
    Command::new("tx")
        .about("Record and list transactions")
        .subcommand(
            Command::new("add")
                .arg(type_arg(true))
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(Arg::new("category").long("category").required(true))
                .arg(
                    Arg::new("date")
                        .long("date")
                        .help("YYYY-MM-DD or 'YYYY-MM-DD HH:MM'; defaults to now"),
                )
                .arg(Arg::new("note").long("note")),
        )
        .subcommand(
            Command::new("list")
                .arg(Arg::new("month").long("month"))
                .arg(Arg::new("category").long("category"))
                .arg(type_arg(false))
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize)),
                )
                .args(json_args()),
        )
        .subcommand(
            Command::new("edit")
                .arg(id_arg())
                .arg(type_arg(false))
                .arg(Arg::new("amount").long("amount"))
                .arg(Arg::new("category").long("category"))
                .arg(Arg::new("date").long("date"))
                .arg(Arg::new("note").long("note")),
        )
        .subcommand(Command::new("rm").arg(id_arg()))
}

fn report_cmd() -> Command {
    Command::new("report")
        .about("Reports")
        .subcommand(
            Command::new("top")
                .about("Top categories in the current window")
                .arg(
                    Arg::new("type")
                        .long("type")
                        .value_parser(["income", "expense"])
                        .default_value("expense"),
                )
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize))
                        .default_value("5"),
                )
                .arg(period_arg())
                .args(json_args()),
        )
        .subcommand(
            Command::new("cashflow")
                .arg(
                    Arg::new("months")
                        .long("months")
                        .value_parser(value_parser!(usize))
                        .default_value("6"),
                )
                .args(json_args()),
        )
        .subcommand(
            Command::new("month")
                .about("Calendar month totals and expenses by category")
                .arg(Arg::new("month").long("month"))
                .args(json_args()),
        )
        .subcommand(
            Command::new("daily")
                .about("Per-day totals for the current window")
                .arg(period_arg())
                .args(json_args()),
        )
        .subcommand(
            Command::new("recent")
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize))
                        .default_value("6"),
                )
                .arg(period_arg())
                .args(json_args()),
        )
}

fn budget_cmd() -> Command {
    Command::new("budget")
        .about("Monthly category budgets")
        .subcommand(
            Command::new("add")
                .about("Create a budget; one per category and month")
                .arg(Arg::new("category").long("category").required(true))
                .arg(Arg::new("limit").long("limit").required(true))
                .arg(Arg::new("month").long("month").help("YYYY-MM; defaults to this month")),
        )
        .subcommand(
            Command::new("limit")
                .about("Change the limit of an existing budget")
                .arg(id_arg())
                .arg(Arg::new("limit").long("limit").required(true)),
        )
        .subcommand(
            Command::new("list")
                .arg(Arg::new("month").long("month"))
                .args(json_args()),
        )
        .subcommand(
            Command::new("status")
                .arg(Arg::new("month").long("month"))
                .args(json_args()),
        )
        .subcommand(
            Command::new("safe")
                .about("Daily safe-to-spend figure")
                .args(json_args()),
        )
        .subcommand(Command::new("rm").arg(id_arg()))
}

fn basis_arg() -> Arg {
    Arg::new("basis")
        .long("basis")
        .value_parser(["balance", "budgets"])
        .default_value("balance")
        .help("Daily budget from the remaining balance or from budget limits / 30")
}

fn streak_cmd() -> Command {
    Command::new("streak")
        .about("Savings streak")
        .subcommand(Command::new("show").args(json_args()))
        .subcommand(
            Command::new("update")
                .about("Evaluate today (once per day)")
                .arg(basis_arg()),
        )
        .subcommand(
            Command::new("history")
                .arg(
                    Arg::new("days")
                        .long("days")
                        .value_parser(value_parser!(usize))
                        .help("Number of days ending today (default 30, at most 3660)"),
                )
                .arg(basis_arg())
                .args(json_args()),
        )
        .subcommand(Command::new("reset"))
}

fn debt_cmd() -> Command {
    Command::new("debt")
        .about("Debts you owe and loans owed to you")
        .subcommand(
            Command::new("add")
                .arg(
                    Arg::new("type")
                        .long("type")
                        .value_parser(["debt", "loan"])
                        .required(true),
                )
                .arg(Arg::new("person").long("person").required(true))
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(Arg::new("description").long("description"))
                .arg(Arg::new("due").long("due"))
                .arg(Arg::new("note").long("note")),
        )
        .subcommand(
            Command::new("list")
                .arg(
                    Arg::new("type")
                        .long("type")
                        .value_parser(["debt", "loan"]),
                )
                .arg(
                    Arg::new("all")
                        .long("all")
                        .action(ArgAction::SetTrue)
                        .help("Include settled items"),
                )
                .args(json_args()),
        )
        .subcommand(
            Command::new("pay")
                .arg(id_arg())
                .arg(Arg::new("amount").long("amount").required(true)),
        )
        .subcommand(
            Command::new("edit")
                .arg(id_arg())
                .arg(Arg::new("person").long("person"))
                .arg(Arg::new("amount").long("amount"))
                .arg(Arg::new("description").long("description"))
                .arg(Arg::new("due").long("due"))
                .arg(Arg::new("note").long("note")),
        )
        .subcommand(Command::new("settle").about("Pay in full").arg(id_arg()))
        .subcommand(
            Command::new("due")
                .arg(
                    Arg::new("days")
                        .long("days")
                        .value_parser(value_parser!(u32))
                        .default_value("7"),
                )
                .args(json_args()),
        )
        .subcommand(Command::new("totals").args(json_args()))
        .subcommand(Command::new("rm").arg(id_arg()))
}

fn sub_cmd() -> Command {
    Command::new("sub")
        .about("Recurring subscriptions")
        .subcommand(
            Command::new("add")
                .arg(Arg::new("name").long("name").required(true))
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(
                    Arg::new("cycle")
                        .long("cycle")
                        .value_parser(["daily", "weekly", "monthly", "yearly"])
                        .required(true),
                )
                .arg(Arg::new("next").long("next").required(true))
                .arg(Arg::new("description").long("description"))
                .arg(Arg::new("category").long("category")),
        )
        .subcommand(Command::new("list").args(json_args()))
        .subcommand(Command::new("pay").about("Advance to the next billing date").arg(id_arg()))
        .subcommand(
            Command::new("edit")
                .arg(id_arg())
                .arg(Arg::new("name").long("name"))
                .arg(Arg::new("amount").long("amount"))
                .arg(
                    Arg::new("cycle")
                        .long("cycle")
                        .value_parser(["daily", "weekly", "monthly", "yearly"]),
                )
                .arg(Arg::new("description").long("description"))
                .arg(Arg::new("category").long("category")),
        )
        .subcommand(Command::new("toggle").about("Pause or resume").arg(id_arg()))
        .subcommand(Command::new("cancel").arg(id_arg()))
        .subcommand(
            Command::new("due")
                .arg(
                    Arg::new("days")
                        .long("days")
                        .value_parser(value_parser!(u32))
                        .default_value("3"),
                )
                .args(json_args()),
        )
        .subcommand(Command::new("total").about("Monthly-equivalent cost of active subscriptions"))
        .subcommand(Command::new("rm").arg(id_arg()))
}

fn wish_cmd() -> Command {
    Command::new("wish")
        .about("Wishlist with a 30-day cooling-off period")
        .subcommand(
            Command::new("add")
                .arg(Arg::new("name").long("name").required(true))
                .arg(Arg::new("price").long("price").required(true))
                .arg(Arg::new("description").long("description"))
                .arg(Arg::new("icon").long("icon")),
        )
        .subcommand(Command::new("list").args(json_args()))
        .subcommand(Command::new("buy").arg(id_arg()))
        .subcommand(Command::new("cancel").arg(id_arg()))
        .subcommand(
            Command::new("save")
                .arg(id_arg())
                .arg(Arg::new("amount").long("amount").required(true)),
        )
        .subcommand(Command::new("rm").arg(id_arg()))
}
