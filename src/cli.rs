// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};
use std::path::PathBuf;

fn json_flag() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Print JSON instead of a table")
}

fn date_range_args(cmd: Command) -> Command {
    cmd.arg(Arg::new("from").long("from").help("First date (YYYY-MM-DD), inclusive"))
        .arg(Arg::new("to").long("to").help("Last date (YYYY-MM-DD), inclusive"))
}

pub fn build_cli() -> Command {
    Command::new("tally")
        .about("Password-gated personal ledger")
        .version(clap::crate_version!())
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .env("TALLY_DB")
                .value_parser(value_parser!(PathBuf))
                .help("Path to the ledger store"),
        )
        .arg(
            Arg::new("password")
                .long("password")
                .global(true)
                .env("TALLY_PASSWORD")
                .hide_env_values(true)
                .help("Password for a protected store (prompted when omitted)"),
        )
        .subcommand(Command::new("init").about("Create the store and seed defaults"))
        .subcommand(
            Command::new("password")
                .about("Manage the startup password")
                .subcommand(
                    Command::new("set")
                        .about("Set or replace the password")
                        .arg(Arg::new("new").long("new").help("New password (prompted when omitted)")),
                )
                .subcommand(Command::new("check").about("Verify a password"))
                .subcommand(Command::new("status").about("Show whether a password is configured")),
        )
        .subcommand(
            Command::new("account")
                .about("Accounts")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").required(true))
                        .arg(
                            Arg::new("balance")
                                .long("balance")
                                .default_value("0")
                                .help("Opening balance"),
                        ),
                )
                .subcommand(Command::new("list").arg(json_flag()))
                .subcommand(Command::new("balance").arg(Arg::new("name").required(true))),
        )
        .subcommand(
            Command::new("category")
                .about("Categories")
                .subcommand(Command::new("add").arg(Arg::new("name").required(true)))
                .subcommand(Command::new("list").arg(json_flag()))
                .subcommand(
                    Command::new("budget")
                        .about("Set the advisory budget threshold")
                        .arg(Arg::new("name").required(true))
                        .arg(Arg::new("amount").required(true)),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Income and expense transactions")
                .subcommand(
                    Command::new("add")
                        .arg(
                            Arg::new("kind")
                                .long("kind")
                                .required(true)
                                .help("income|expense"),
                        )
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("account").long("account").required(true))
                        .arg(Arg::new("date").long("date").required(true))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("description").long("description")),
                )
                .subcommand(date_range_args(
                    Command::new("list")
                        .arg(Arg::new("account").long("account"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        )
                        .arg(json_flag()),
                )),
        )
        .subcommand(
            Command::new("transfer")
                .about("Move money between two accounts")
                .arg(Arg::new("from").long("from").required(true))
                .arg(Arg::new("to").long("to").required(true))
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(Arg::new("date").long("date").required(true))
                .arg(
                    Arg::new("description")
                        .long("description")
                        .default_value(""),
                ),
        )
        .subcommand(date_range_args(
            Command::new("export")
                .about("Write the transaction projection to a file")
                .arg(Arg::new("format").long("format").default_value("csv"))
                .arg(Arg::new("out").long("out").required(true))
                .arg(Arg::new("locale").long("locale").default_value("en")),
        ))
        .subcommand(
            Command::new("doctor").about("Check stored balances against transaction history"),
        )
}
