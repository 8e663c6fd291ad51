//! Interactive REPL: the user-facing surface over the conversation store.

use anyhow::Result;
use chrono::Local;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::api::{GenerationClient, FALLBACK_REPLY};
use crate::chat::grouping::group_conversations;
use crate::chat::store::ChatStore;
use crate::config::ClientConfig;
use crate::files::Attachment;
use crate::models::{Message, Role};
use crate::storage::FileStorage;

/// Run interactive REPL mode
pub async fn run(config: &ClientConfig) -> Result<()> {
    let storage = FileStorage::new(&config.data_dir)?;
    let mut store = ChatStore::load(Box::new(storage));
    let client = GenerationClient::new(&config.api_base_url, config.request_timeout)?;

    println!(
        "{}",
        "🎓 EduGen AI - Educational Assistant".bright_cyan().bold()
    );
    println!(
        "{}",
        format!("Service: {}", config.api_base_url).bright_black()
    );
    println!(
        "{}",
        "Type '/help' for commands, 'exit' or 'quit' to leave\n".bright_black()
    );

    print_conversation(&store);

    let mut rl = DefaultEditor::new()?;
    let mut attachments: Vec<Attachment> = Vec::new();

    loop {
        let title = store.current().map(|c| c.title.clone()).unwrap_or_default();
        let prompt = format!(
            "{} {} ",
            format!("[{}]", title).bright_magenta(),
            "You:".bright_green().bold()
        );

        match rl.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line);

                if line == "exit" || line == "quit" {
                    println!("{}", "Goodbye!".bright_cyan());
                    break;
                }

                if line == "/help" {
                    print_help();
                    continue;
                }

                if line == "/new" {
                    store.create_conversation();
                    println!("{} Started a new conversation", "✨".bright_green());
                    print_conversation(&store);
                    continue;
                }

                if line == "/list" {
                    print_list(&store);
                    continue;
                }

                if line.starts_with("/switch ") {
                    let arg = line["/switch ".len()..].trim();
                    match switch_by_index(&mut store, arg) {
                        Ok(title) => {
                            println!("{} Switched to \"{}\"", "📂".bright_green(), title);
                            print_conversation(&store);
                        }
                        Err(e) => eprintln!("{} {}", "❌".bright_red(), e),
                    }
                    continue;
                }

                if line.starts_with("/rename ") {
                    let title = line["/rename ".len()..].trim();
                    if title.is_empty() {
                        eprintln!("{} Usage: /rename <new title>", "❌".bright_red());
                    } else {
                        let id = store.current_id().to_string();
                        store.rename_conversation(&id, title);
                        println!("{} Renamed to \"{}\"", "✏️".bright_green(), title);
                    }
                    continue;
                }

                if line == "/delete" {
                    match delete_current(&mut store) {
                        Ok(title) => {
                            println!("{} Deleted \"{}\"", "🗑️".bright_green(), title);
                            print_conversation(&store);
                        }
                        Err(e) => eprintln!("{} {}", "❌".bright_red(), e),
                    }
                    continue;
                }

                if line.starts_with("/attach ") {
                    let path = line["/attach ".len()..].trim();
                    match Attachment::from_path(path) {
                        Ok(attachment) => {
                            println!(
                                "{} Staged {} ({})",
                                "📎".bright_green(),
                                attachment.name,
                                attachment.media_type
                            );
                            attachments.push(attachment);
                        }
                        Err(e) => eprintln!("{} {:#}", "❌".bright_red(), e),
                    }
                    continue;
                }

                if line == "/attachments" {
                    if attachments.is_empty() {
                        println!("{} No files staged", "ℹ️".bright_blue());
                    } else {
                        for (i, attachment) in attachments.iter().enumerate() {
                            println!("  {}. {} ({})", i + 1, attachment.name, attachment.media_type);
                        }
                    }
                    continue;
                }

                if line.starts_with("/detach ") {
                    let arg = line["/detach ".len()..].trim();
                    match arg.parse::<usize>() {
                        Ok(n) if n >= 1 && n <= attachments.len() => {
                            let removed = attachments.remove(n - 1);
                            println!("{} Removed {}", "📎".bright_green(), removed.name);
                        }
                        _ => eprintln!("{} No staged file numbered '{}'", "❌".bright_red(), arg),
                    }
                    continue;
                }

                if line.starts_with('/') {
                    eprintln!("{} Unknown command: {}. Try /help", "❌".bright_red(), line);
                    continue;
                }

                // Awaiting the turn here keeps sends serialized: a second
                // message cannot be submitted while one is outstanding.
                send_turn(&mut store, &client, line, &mut attachments, config.verbose).await;
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "Interrupted. Type 'exit' to quit.".bright_black());
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "Goodbye!".bright_cyan());
                break;
            }
            Err(e) => {
                eprintln!("{} Input error: {}", "❌".bright_red(), e);
                break;
            }
        }
    }

    Ok(())
}

/// One chat turn: append the user message, call the service, append the
/// reply or the fallback. Staged attachments are consumed either way.
async fn send_turn(
    store: &mut ChatStore,
    client: &GenerationClient,
    input: &str,
    attachments: &mut Vec<Attachment>,
    verbose: bool,
) {
    let mut content = input.to_string();
    if !attachments.is_empty() {
        let names: Vec<&str> = attachments.iter().map(|a| a.name.as_str()).collect();
        content.push_str(&format!(
            "\n\n[Attached {} file(s): {}]",
            attachments.len(),
            names.join(", ")
        ));
    }
    store.add_message(Message::user(content));

    let messages = store.messages();
    if verbose {
        println!(
            "{}",
            format!(
                "Sending {} message(s), {} attachment(s)",
                messages.len(),
                attachments.len()
            )
            .bright_black()
        );
    }
    println!("{}", "🤔 Thinking...".bright_black());

    match client.send(&messages, attachments).await {
        Ok(reply) => {
            println!("\n{} {}\n", "EduGen:".bright_cyan().bold(), reply);
            store.add_message(Message::assistant(reply));
        }
        Err(e) => {
            eprintln!("{} Generation request failed: {}", "❌".bright_red(), e);
            println!("\n{} {}\n", "EduGen:".bright_cyan().bold(), FALLBACK_REPLY);
            store.add_message(Message::assistant(FALLBACK_REPLY));
        }
    }

    attachments.clear();
}

/// Delete the current conversation. The interface refuses to delete the only
/// remaining conversation.
pub(crate) fn delete_current(store: &mut ChatStore) -> Result<String, String> {
    if store.conversations().len() <= 1 {
        return Err("Cannot delete the only conversation".to_string());
    }
    let (id, title) = match store.current() {
        Some(c) => (c.id.clone(), c.title.clone()),
        None => return Err("No current conversation".to_string()),
    };
    store.delete_conversation(&id);
    Ok(title)
}

/// Switch by the 1-based index shown in `/list`. Returns the new title.
pub(crate) fn switch_by_index(store: &mut ChatStore, arg: &str) -> Result<String, String> {
    let n: usize = arg
        .parse()
        .map_err(|_| "Usage: /switch <number> (see /list)".to_string())?;
    let id = store
        .conversations()
        .get(n.wrapping_sub(1))
        .map(|c| c.id.clone())
        .ok_or_else(|| format!("No conversation numbered '{}'", n))?;
    store.switch_conversation(&id);
    Ok(store.current().map(|c| c.title.clone()).unwrap_or_default())
}

fn print_conversation(store: &ChatStore) {
    for message in store.messages() {
        match message.role {
            Role::User => println!("{} {}", "You:".bright_green().bold(), message.content),
            Role::Assistant => println!("{} {}", "EduGen:".bright_cyan().bold(), message.content),
        }
    }
    println!();
}

fn print_list(store: &ChatStore) {
    let now = Local::now();
    let conversations = store.conversations();
    for (bucket, members) in group_conversations(conversations, now) {
        println!("{}", bucket.label().bright_black());
        for conv in members {
            let index = conversations
                .iter()
                .position(|c| c.id == conv.id)
                .unwrap_or(0);
            let marker = if conv.id == store.current_id() {
                "▶".bright_green().to_string()
            } else {
                " ".to_string()
            };
            println!(
                "  {} {}. {} ({} message{})",
                marker,
                index + 1,
                conv.title,
                conv.messages.len(),
                if conv.messages.len() == 1 { "" } else { "s" }
            );
        }
    }
}

fn print_help() {
    println!("{} Commands:", "💡".bright_cyan());
    println!("  /new              - Start a new conversation");
    println!("  /list             - List conversations grouped by date");
    println!("  /switch <number>  - Switch to a conversation from /list");
    println!("  /rename <title>   - Rename the current conversation");
    println!("  /delete           - Delete the current conversation");
    println!("  /attach <path>    - Stage a file for the next message");
    println!("  /attachments      - Show staged files");
    println!("  /detach <number>  - Remove a staged file");
    println!("  exit, quit        - Leave");
}
