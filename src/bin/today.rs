//! Show what happened on a day, in the terminal
//!
//! The optional argument is the date to start on (`YYYY-MM-DD`, defaults to today).
//! Then every line read on stdin selects a new date; an empty line selects today again.
//! The data source is [`today_in_history::config::DATA_SOURCE`]: set `TODAY_SOURCE=anniversaries`
//! to scrape the "Selected anniversaries" pages instead of using the feed.

use std::error::Error;
use std::io::BufRead;

use chrono::NaiveDate;
use tokio::sync::mpsc;

use today_in_history::config;
use today_in_history::controller::Processed;
use today_in_history::legacy::AnniversaryFeed;
use today_in_history::traits::FeedSource;
use today_in_history::{Client, DateController, HistoryClient, ViewModel};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let initial_date = match std::env::args().nth(1) {
        None => today_in_history::today(),
        Some(arg) => parse_date(&arg)?,
    };

    match config::get(&config::DATA_SOURCE).as_str() {
        "anniversaries" => run(AnniversaryFeed::from_config()?, initial_date).await,
        "feed" => run(Client::from_config()?, initial_date).await,
        other => return Err(format!("Unknown data source {:?} (expected \"feed\" or \"anniversaries\")", other).into()),
    }
    Ok(())
}

fn parse_date(input: &str) -> Result<NaiveDate, Box<dyn Error>> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(today_in_history::today());
    }
    NaiveDate::parse_from_str(input, DATE_FORMAT)
        .map_err(|err| format!("Invalid date {:?} (expected YYYY-MM-DD): {}", input, err).into())
}

async fn run<S>(source: S, initial_date: NaiveDate)
where
    S: FeedSource + Send + Sync + 'static,
{
    let mut controller = DateController::new(HistoryClient::new(source), initial_date);
    println!("{}", ViewModel::from(controller.snapshot()));

    let mut dates = spawn_date_reader();
    let mut input_open = true;

    loop {
        tokio::select! {
            line = dates.recv(), if input_open => match line {
                None => input_open = false,
                Some(line) => match parse_date(&line) {
                    Err(err) => eprintln!("{}", err),
                    Ok(date) => {
                        controller.select_date(date);
                        println!("{}", ViewModel::from(controller.snapshot()));
                    },
                },
            },
            processed = controller.process_next() => {
                if processed == Processed::Applied {
                    println!("{}", ViewModel::from(controller.snapshot()));
                }
            },
        }

        if input_open == false && controller.state().is_loading() == false {
            break;
        }
    }
}

/// Stdin is blocking, so it is read from a dedicated thread
fn spawn_date_reader() -> mpsc::UnboundedReceiver<String> {
    let (sender, receiver) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    log::warn!("Unable to read stdin: {}", err);
                    break;
                },
            };
            if sender.send(line).is_err() {
                break;
            }
        }
    });
    receiver
}
