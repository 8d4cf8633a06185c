use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Local, Utc};
use clap::{Parser, Subcommand};

use unihelp::config::Config;
use unihelp::logging::init_tracing;
use unihelp::model::{Category, QuestionId, SystemClock};
use unihelp::persist::JsonFileStore;
use unihelp::session::{login, Session, SessionFile, DEMO_USERS};
use unihelp::store::QaStore;
use unihelp::views::{
    chat_list, filter_questions, FeedQuery, ProfileStats, QuestionDetail, ViewMode,
};

#[derive(Debug, Parser)]
#[command(name = "unihelp", version, about = "Ask questions, answer them and chat with helpers")]
struct Cli {
    /// Config file (default: ~/.config/unihelp/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the state file location
    #[arg(long, global = true)]
    state: Option<PathBuf>,

    /// Override the session file location
    #[arg(long, global = true)]
    session: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Log in with a demo account
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the current session
    Logout,
    /// Show who is logged in
    Whoami,
    /// List questions
    Questions {
        /// all, mine, resolved or open
        #[arg(long, default_value = "all")]
        mode: ViewMode,
        /// math, physics, programming or other
        #[arg(long)]
        category: Option<Category>,
        /// Search in title and description
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Ask a new question
    Ask {
        #[arg(long)]
        title: String,
        #[arg(long)]
        body: String,
        #[arg(long, default_value = "other")]
        category: Category,
    },
    /// Show a question with its answers
    Show { id: QuestionId },
    /// Answer a question
    Answer { id: QuestionId, text: String },
    /// Pick the best answer for your question
    Best { question: QuestionId, answer: u64 },
    /// Mark your question as resolved
    Resolve { question: QuestionId },
    /// Rate the helper who gave the best answer (1-5)
    Rate { question: QuestionId, value: u8 },
    /// List your conversations
    Chats,
    /// Read the conversation about a question
    Chat { question: QuestionId },
    /// Send a message in the conversation about a question
    Send { question: QuestionId, text: String },
    /// Count unread messages
    Unread,
    /// Show your profile and statistics
    Profile,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let mut config = Config::load_from(&config_path)?;
    if let Some(state) = cli.state {
        config.storage.state_path = Some(state);
    }
    if let Some(session) = cli.session {
        config.storage.session_path = Some(session);
    }
    config.validate()?;

    let sessions = SessionFile::new(config.storage.resolved_session_path());

    match &cli.command {
        Command::Login { email, password } => return log_in(&sessions, email, password),
        Command::Logout => {
            sessions.clear()?;
            println!("Logged out");
            return Ok(());
        }
        _ => {}
    }

    let session = sessions
        .load()?
        .context("Not logged in. Run `unihelp login --email <EMAIL> --password <PASSWORD>` first.")?;

    // Held until the command finishes, so concurrent runs apply in turn.
    let persistence = JsonFileStore::locked(config.storage.resolved_state_path())?;
    let mut store = QaStore::open(Box::new(persistence), Box::new(SystemClock), config.policy);

    match cli.command {
        Command::Login { .. } | Command::Logout => Ok(()),
        Command::Whoami => {
            println!("{} <{}> - {}", session.name, session.email, session.role.label());
            Ok(())
        }
        Command::Questions {
            mode,
            category,
            search,
        } => {
            let query = FeedQuery {
                mode,
                category,
                search,
            };
            print_feed(&store, &session, &query);
            Ok(())
        }
        Command::Ask {
            title,
            body,
            category,
        } => {
            if title.trim().is_empty() {
                bail!("Add a clear title for your question.");
            }
            if body.trim().is_empty() {
                bail!("Describe the problem in at least two or three sentences.");
            }
            let id = store.add_question(title.trim(), body.trim(), &session.name, category)?;
            println!("Question #{id} posted");
            Ok(())
        }
        Command::Show { id } => print_question(&store, &session, id),
        Command::Answer { id, text } => {
            if text.trim().is_empty() {
                bail!("Write something in your answer.");
            }
            let answer_id = store.add_answer(id, text.trim(), &session.name)?;
            println!("Answer #{answer_id} added to question #{id}");
            Ok(())
        }
        Command::Best { question, answer } => {
            store.choose_best_answer(&session.actor(), question, answer)?;
            println!("Answer #{answer} marked as best");
            Ok(())
        }
        Command::Resolve { question } => {
            store.mark_question_resolved(&session.actor(), question, true)?;
            println!("Question #{question} resolved");
            Ok(())
        }
        Command::Rate { question, value } => {
            let helper = {
                let detail = QuestionDetail::build(store.snapshot(), question, &session.actor())
                    .with_context(|| format!("Question {question} not found"))?;
                if !detail.can_rate {
                    bail!("Only the author can rate the helper, after choosing a best answer and resolving the question.");
                }
                detail
                    .helper_name
                    .map(str::to_string)
                    .context("No helper to rate yet")?
            };
            store.rate_helper(&session.actor(), question, value, &helper)?;
            println!("Rated {helper} {value}/5");
            Ok(())
        }
        Command::Chats => {
            print_chats(&store, &session);
            Ok(())
        }
        Command::Chat { question } => {
            print_chat(&store, question)?;
            store.mark_chat_read(question, session.role)?;
            Ok(())
        }
        Command::Send { question, text } => {
            if text.trim().is_empty() {
                bail!("Message is empty.");
            }
            store.add_chat_message(question, text.trim(), session.role, &session.name)?;
            println!("Sent");
            Ok(())
        }
        Command::Unread => {
            println!("{}", store.unread_count_for_role(session.role));
            Ok(())
        }
        Command::Profile => {
            print_profile(&store, &session);
            Ok(())
        }
    }
}

fn log_in(sessions: &SessionFile, email: &str, password: &str) -> Result<()> {
    let session = match login(email, password) {
        Ok(session) => session,
        Err(e) => {
            let accounts: Vec<&str> = DEMO_USERS.iter().map(|u| u.email).collect();
            bail!("{e}\nDemo accounts: {}", accounts.join(", "));
        }
    };
    sessions.save(&session)?;
    println!("Logged in as {} ({})", session.name, session.role.label());
    Ok(())
}

fn local_time(at: &DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

fn print_feed(store: &QaStore, session: &Session, query: &FeedQuery) {
    let questions = filter_questions(store.snapshot(), query, session.role, &session.name);
    if questions.is_empty() {
        println!("No questions match.");
        return;
    }
    for q in questions {
        let status = if q.resolved { "resolved" } else { "open" };
        println!(
            "#{} [{}] {} - {} ({} answers, {})",
            q.id,
            q.category.label(),
            q.title,
            q.author,
            q.answers_count,
            status
        );
    }
}

fn print_question(store: &QaStore, session: &Session, id: QuestionId) -> Result<()> {
    let detail = QuestionDetail::build(store.snapshot(), id, &session.actor())
        .with_context(|| format!("Question {id} not found"))?;
    let q = detail.question;
    println!("#{} {} [{}]", q.id, q.title, q.category.label());
    println!("{}", q.body);
    println!("Author: {} | Status: {}", q.author, detail.status.label());
    if let (Some(helper), Some(rating)) = (detail.helper_name, detail.rating) {
        println!("Helper: {helper} | Rating: {}/5", rating.value);
    }
    println!();

    if detail.answers.is_empty() {
        println!("No answers yet.");
    }
    for answer in detail.answers {
        let marker = if detail.is_best(answer) { " [best]" } else { "" };
        println!(
            "  #{}{} {} ({})",
            answer.id,
            marker,
            answer.author,
            local_time(&answer.created_at)
        );
        println!("    {}", answer.text);
    }

    let mut hints = Vec::new();
    if detail.can_choose_best && !detail.answers.is_empty() {
        hints.push(format!("unihelp best {id} <ANSWER>"));
    }
    if detail.can_resolve {
        hints.push(format!("unihelp resolve {id}"));
    }
    if detail.can_rate {
        hints.push(format!("unihelp rate {id} <1-5>"));
    }
    if detail.can_open_chat {
        hints.push(format!("unihelp chat {id}"));
    }
    if !hints.is_empty() {
        println!();
        println!("Next: {}", hints.join(" | "));
    }
    Ok(())
}

fn print_chats(store: &QaStore, session: &Session) {
    let rows = chat_list(store.snapshot(), session.role, &session.name);
    if rows.is_empty() {
        println!("No conversations yet.");
        return;
    }
    for row in rows {
        let status = if row.question_resolved { "resolved" } else { "open" };
        let new = if row.has_unread { " [new]" } else { "" };
        println!(
            "#{} {} ({}){} - {}: {} ({})",
            row.question_id,
            row.question_title,
            status,
            new,
            row.last_message.sender_name,
            row.last_message.text,
            local_time(&row.last_message.created_at)
        );
    }
}

fn print_chat(store: &QaStore, question_id: QuestionId) -> Result<()> {
    let question = store
        .question(question_id)
        .with_context(|| format!("Question {question_id} not found"))?;
    println!("Chat: {}", question.title);
    let messages = store.chat(question_id);
    if messages.is_empty() {
        println!("No messages yet.");
    }
    for m in messages {
        println!(
            "[{}] {} ({}): {}",
            local_time(&m.created_at),
            m.sender_name,
            m.sender_role,
            m.text
        );
    }
    Ok(())
}

fn print_profile(store: &QaStore, session: &Session) {
    println!("{} <{}> - {}", session.name, session.email, session.role.label());
    match ProfileStats::for_user(store.snapshot(), session.role, &session.name) {
        ProfileStats::Student(stats) => {
            println!("Questions asked: {}", stats.total);
            println!("Resolved: {}", stats.resolved);
            println!("Unresolved: {}", stats.unresolved);
        }
        ProfileStats::Helper(stats) => {
            println!("Answers given: {}", stats.answers_given);
            println!("Chosen as best: {}", stats.accepted);
            println!("Ratings received: {}", stats.ratings_received);
            match stats.average_rating {
                Some(avg) => println!("Average rating: {avg:.1} / 5"),
                None => println!("Average rating: -"),
            }
        }
    }
    let unread = store.unread_count_for_role(session.role);
    if unread > 0 {
        println!("Unread messages: {unread}");
    }
}
