use crate::{
    cli::Cli,
    controller::Controller,
    db::Database,
    entity::{group, member, GroupId, MemberId},
    ledger::{
        parse_expense_date, suggest_transfers, HistoryItem, Ledger, LedgerError, MemberBalance,
    },
};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use std::collections::HashMap;
use teloxide::{
    dispatching::dialogue::{self, InMemStorage},
    prelude::*,
    utils::command::BotCommands,
};
use tracing::{info, warn};

type MyDialogue = Dialogue<ChatState, InMemStorage<ChatState>>;
type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[derive(BotCommands, Clone, Debug)]
#[command(
    rename_rule = "lowercase",
    description = "Splittea supports the following commands:"
)]
enum Command {
    #[command(description = "display this text")]
    Help,
    #[command(description = "create new group and put yourself as it's first member")]
    CreateGroup,
    #[command(description = "join a group by its id")]
    JoinGroup,
    #[command(description = "list all your groups")]
    ListMyGroups,
    #[command(description = "list members of a group with their ids")]
    Members,
    #[command(description = "add an expense you paid, split evenly")]
    AddExpense,
    #[command(description = "replace an existing expense")]
    EditExpense,
    #[command(description = "delete an expense")]
    DeleteExpense,
    #[command(description = "record a payment you made to another member")]
    Settle,
    #[command(description = "show who owes whom in a group")]
    Balances,
    #[command(description = "show expenses and settlements, newest first")]
    History,
    #[command(description = "cancel whatever you do")]
    Cancel,
}

/// What to do once the user has picked a group.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum GroupAction {
    Members,
    AddExpense,
    EditExpense,
    DeleteExpense,
    Settle,
    Balances,
    History,
}

/// The expense being written: a new one, or the replacement of `expense_id`.
#[derive(Clone, Copy, Debug)]
struct ExpenseTarget {
    group_id: GroupId,
    expense_id: Option<i64>,
}

#[derive(Clone, Default)]
enum ChatState {
    #[default]
    Start,
    // ----- Create group
    ReceiveGroupName,
    // ----- Join group
    ReceiveGroupIdToJoin,
    // ----- Anything scoped to a group
    ReceiveGroupId {
        action: GroupAction,
    },
    // ----- Edit / delete expense
    ReceiveExpenseId {
        group_id: GroupId,
        action: GroupAction,
    },
    // ----- Add / edit expense
    ReceiveAmountSpent {
        target: ExpenseTarget,
    },
    ReceiveDescription {
        target: ExpenseTarget,
        amount: Decimal,
    },
    ReceiveDate {
        target: ExpenseTarget,
        amount: Decimal,
        description: String,
    },
    ReceiveParticipants {
        target: ExpenseTarget,
        amount: Decimal,
        description: String,
        date: NaiveDate,
    },
    // ----- Settle
    ReceiveReceiver {
        group_id: GroupId,
    },
    ReceiveSettlementAmount {
        group_id: GroupId,
        receiver_id: MemberId,
    },
}

pub async fn run(cli: &Cli) -> anyhow::Result<()> {
    info!("Starting running splittea...");
    let db = Database::new(&cli.database).await.map_err(|err| {
        anyhow::anyhow!("Failed to connect to database {:?}: {err}", cli.database)
    })?;
    db.apply_migrations()
        .await
        .map_err(|err| anyhow::anyhow!("Failed to apply database migrations: {err}"))?;
    let ledger = db.ledger();

    let bot = Bot::new(&cli.token);
    bot.set_my_commands(Command::bot_commands()).await?;

    use dptree::case;
    let command_handler = teloxide::filter_command::<Command, _>()
        .branch(
            case![ChatState::Start]
                .branch(case![Command::Help].endpoint(help))
                .branch(case![Command::ListMyGroups].endpoint(list_my_groups))
                .branch(case![Command::CreateGroup].endpoint(create_group))
                .branch(case![Command::JoinGroup].endpoint(join_group))
                .branch(case![Command::Members].endpoint(members))
                .branch(case![Command::AddExpense].endpoint(add_expense))
                .branch(case![Command::EditExpense].endpoint(edit_expense))
                .branch(case![Command::DeleteExpense].endpoint(delete_expense))
                .branch(case![Command::Settle].endpoint(settle))
                .branch(case![Command::Balances].endpoint(balances))
                .branch(case![Command::History].endpoint(history))
                .branch(case![Command::Cancel].endpoint(cancel)),
        )
        .branch(case![Command::Cancel].endpoint(cancel));

    let message_handler = Update::filter_message()
        // ----- Create group
        .branch(case![ChatState::ReceiveGroupName].endpoint(receive_group_name))
        // ----- Join group
        .branch(case![ChatState::ReceiveGroupIdToJoin].endpoint(receive_group_id_to_join))
        // ----- Group scoped commands
        .branch(case![ChatState::ReceiveGroupId { action }].endpoint(receive_group_id))
        .branch(
            case![ChatState::ReceiveExpenseId { group_id, action }].endpoint(receive_expense_id),
        )
        // ----- Add / edit expense
        .branch(case![ChatState::ReceiveAmountSpent { target }].endpoint(receive_amount_spent))
        .branch(
            case![ChatState::ReceiveDescription { target, amount }]
                .endpoint(receive_description),
        )
        .branch(
            case![ChatState::ReceiveDate {
                target,
                amount,
                description
            }]
            .endpoint(receive_date),
        )
        .branch(
            case![ChatState::ReceiveParticipants {
                target,
                amount,
                description,
                date
            }]
            .endpoint(receive_participants),
        )
        // ----- Settle
        .branch(case![ChatState::ReceiveReceiver { group_id }].endpoint(receive_receiver))
        .branch(
            case![ChatState::ReceiveSettlementAmount {
                group_id,
                receiver_id
            }]
            .endpoint(receive_settlement_amount),
        );

    let composed_handler = Update::filter_message()
        .branch(command_handler)
        .branch(message_handler)
        .branch(dptree::endpoint(invalid_state));

    let handler =
        dialogue::enter::<Update, InMemStorage<ChatState>, ChatState, _>().branch(composed_handler);

    info!("Ready for listening commands hand messages...");
    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![InMemStorage::<ChatState>::new(), db, ledger])
        .error_handler(LoggingErrorHandler::with_custom_text(
            "An error has occurred in the dispatcher",
        ))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}

async fn help(bot: Bot, msg: Message) -> HandlerResult {
    bot.send_message(msg.chat.id, Command::descriptions().to_string())
        .await?;
    Ok(())
}

fn groups_to_pretty(groups: &[group::Model]) -> String {
    groups
        .iter()
        .map(|model| format!("{}: `{}`", model.id, model.name))
        .collect::<Vec<String>>()
        .join("\n")
}

fn members_to_pretty(members: &[member::Model]) -> String {
    members
        .iter()
        .map(|m| format!("{}: {}", m.id, m.display_name))
        .collect::<Vec<String>>()
        .join("\n")
}

fn signed(amount: Decimal) -> String {
    if amount > Decimal::ZERO {
        format!("+{amount}")
    } else {
        amount.to_string()
    }
}

fn balances_to_pretty(balances: &[MemberBalance]) -> String {
    let mut text = String::from("Balances (positive means the group owes you):\n");
    for b in balances {
        text.push_str(&format!("{}: {}\n", b.display_name, signed(b.balance)));
    }

    let names: HashMap<MemberId, &str> = balances
        .iter()
        .map(|b| (b.member_id, b.display_name.as_str()))
        .collect();
    let transfers = suggest_transfers(balances);

    text.push_str("\n --- \n");
    if transfers.is_empty() {
        text.push_str("😊No debt in this group😊");
    } else {
        text.push_str("To settle up:\n");
        for t in transfers {
            let from = names.get(&t.from).copied().unwrap_or("?");
            let to = names.get(&t.to).copied().unwrap_or("?");
            text.push_str(&format!("{from} pays {} to {to}\n", t.amount));
        }
    }
    text
}

fn history_to_pretty(items: &[HistoryItem]) -> String {
    if items.is_empty() {
        return "There is no activity in this group yet".to_string();
    }

    items
        .iter()
        .map(|item| match item {
            HistoryItem::Expense {
                id,
                date,
                amount,
                description,
                payer_name,
                ..
            } => format!(
                "🧾 #{id} {}: {payer_name} paid {amount} for {description}",
                date.format("%Y-%m-%d")
            ),
            HistoryItem::Settlement {
                date,
                amount,
                payer_name,
                receiver_name,
                ..
            } => format!(
                "💸 {}: {payer_name} gave {amount} to {receiver_name}",
                date.format("%Y-%m-%d %H:%M")
            ),
        })
        .collect::<Vec<String>>()
        .join("\n")
}

/// Reports caller mistakes in the chat and resets the dialogue. Store failures
/// are handed to the dispatcher's error handler.
async fn report(bot: &Bot, msg: &Message, dialogue: &MyDialogue, err: LedgerError) -> HandlerResult {
    if !err.is_user_facing() {
        return Err(err.into());
    }
    warn!(%err, chat_id = msg.chat.id.0, "Ledger rejected request");
    bot.send_message(msg.chat.id, format!("😔{err}😔")).await?;
    dialogue.update(ChatState::Start).await?;
    Ok(())
}

async fn list_my_groups(bot: Bot, msg: Message, db: Database, ledger: Ledger) -> HandlerResult {
    let ctl = Controller::from_msg(&db, &ledger, &msg).await?;

    let groups = ctl.get_my_groups().await?;
    if groups.is_empty() {
        bot.send_message(msg.chat.id, "You don't belong to any group yet")
            .await?;
    } else {
        let text = format!("Here are your groups:\n{}", groups_to_pretty(&groups));
        bot.send_message(msg.chat.id, text).await?;
    }

    Ok(())
}

async fn create_group(bot: Bot, dialogue: MyDialogue, msg: Message) -> HandlerResult {
    let text = "Pick a name for your group";
    bot.send_message(msg.chat.id, text).await?;
    dialogue.update(ChatState::ReceiveGroupName).await?;
    Ok(())
}

async fn receive_group_name(
    bot: Bot,
    dialogue: MyDialogue,
    msg: Message,
    db: Database,
    ledger: Ledger,
) -> HandlerResult {
    if let Some(group_name) = msg.text().map(str::trim).filter(|name| !name.is_empty()) {
        let ctl = Controller::from_msg(&db, &ledger, &msg).await?;
        let created_group = ctl.create_group(group_name).await?;

        let text = format!(
            "Group `{}` (id {}) was successfully created and you've been added to it",
            created_group.name, created_group.id
        );
        bot.send_message(dialogue.chat_id(), text).await?;
        dialogue.update(ChatState::Start).await?;
    } else {
        bot.send_message(msg.chat.id, "Please, send a non-empty name:")
            .await?;
    }

    Ok(())
}

async fn join_group(bot: Bot, dialogue: MyDialogue, msg: Message) -> HandlerResult {
    bot.send_message(msg.chat.id, "Send the id of the group you want to join:")
        .await?;
    dialogue.update(ChatState::ReceiveGroupIdToJoin).await?;
    Ok(())
}

async fn receive_group_id_to_join(
    bot: Bot,
    dialogue: MyDialogue,
    msg: Message,
    db: Database,
    ledger: Ledger,
) -> HandlerResult {
    let Some(group_id) = msg.text().and_then(|text| text.trim().parse::<GroupId>().ok()) else {
        bot.send_message(msg.chat.id, "Please, send an integer value: ")
            .await?;
        return Ok(());
    };
    let ctl = Controller::from_msg(&db, &ledger, &msg).await?;

    let text = match ctl.join_group(group_id).await? {
        Some(joined) => format!("You are now a member of `{}`", joined.name),
        None => "Inexistent group id".to_string(),
    };
    bot.send_message(msg.chat.id, text).await?;
    dialogue.update(ChatState::Start).await?;
    Ok(())
}

/// Lists the author's groups and waits for one of their ids.
async fn ask_for_group(
    bot: Bot,
    dialogue: MyDialogue,
    msg: Message,
    db: Database,
    ledger: Ledger,
    action: GroupAction,
) -> HandlerResult {
    let ctl = Controller::from_msg(&db, &ledger, &msg).await?;

    let groups = ctl.get_my_groups().await?;
    if groups.is_empty() {
        bot.send_message(
            msg.chat.id,
            "You are not a member of any group, yet. You can create one with /creategroup",
        )
        .await?;
        dialogue.update(ChatState::Start).await?;
    } else {
        let text = format!(
            "Good, choose id of one of your groups:\n{}",
            groups_to_pretty(&groups)
        );
        bot.send_message(msg.chat.id, text).await?;
        dialogue.update(ChatState::ReceiveGroupId { action }).await?;
    }

    Ok(())
}

async fn members(
    bot: Bot,
    dialogue: MyDialogue,
    msg: Message,
    db: Database,
    ledger: Ledger,
) -> HandlerResult {
    ask_for_group(bot, dialogue, msg, db, ledger, GroupAction::Members).await
}

async fn add_expense(
    bot: Bot,
    dialogue: MyDialogue,
    msg: Message,
    db: Database,
    ledger: Ledger,
) -> HandlerResult {
    ask_for_group(bot, dialogue, msg, db, ledger, GroupAction::AddExpense).await
}

async fn edit_expense(
    bot: Bot,
    dialogue: MyDialogue,
    msg: Message,
    db: Database,
    ledger: Ledger,
) -> HandlerResult {
    ask_for_group(bot, dialogue, msg, db, ledger, GroupAction::EditExpense).await
}

async fn delete_expense(
    bot: Bot,
    dialogue: MyDialogue,
    msg: Message,
    db: Database,
    ledger: Ledger,
) -> HandlerResult {
    ask_for_group(bot, dialogue, msg, db, ledger, GroupAction::DeleteExpense).await
}

async fn settle(
    bot: Bot,
    dialogue: MyDialogue,
    msg: Message,
    db: Database,
    ledger: Ledger,
) -> HandlerResult {
    ask_for_group(bot, dialogue, msg, db, ledger, GroupAction::Settle).await
}

async fn balances(
    bot: Bot,
    dialogue: MyDialogue,
    msg: Message,
    db: Database,
    ledger: Ledger,
) -> HandlerResult {
    ask_for_group(bot, dialogue, msg, db, ledger, GroupAction::Balances).await
}

async fn history(
    bot: Bot,
    dialogue: MyDialogue,
    msg: Message,
    db: Database,
    ledger: Ledger,
) -> HandlerResult {
    ask_for_group(bot, dialogue, msg, db, ledger, GroupAction::History).await
}

async fn receive_group_id(
    bot: Bot,
    dialogue: MyDialogue,
    msg: Message,
    db: Database,
    ledger: Ledger,
    action: GroupAction,
) -> HandlerResult {
    let Some(group_id) = msg.text().and_then(|text| text.trim().parse::<GroupId>().ok()) else {
        bot.send_message(msg.chat.id, "Please, send an integer value: ")
            .await?;
        return Ok(());
    };
    let ctl = Controller::from_msg(&db, &ledger, &msg).await?;

    // Fetching the member list also checks that the author belongs to the group.
    let members = match ctl.members(group_id).await {
        Ok(members) => members,
        Err(err) => return report(&bot, &msg, &dialogue, err).await,
    };

    match action {
        GroupAction::Members => {
            let text = format!("Members of the group:\n{}", members_to_pretty(&members));
            bot.send_message(msg.chat.id, text).await?;
            dialogue.update(ChatState::Start).await?;
        }
        GroupAction::Balances => {
            let text = match ctl.balances(group_id).await {
                Ok(balances) => balances_to_pretty(&balances),
                Err(err) => return report(&bot, &msg, &dialogue, err).await,
            };
            bot.send_message(msg.chat.id, text).await?;
            dialogue.update(ChatState::Start).await?;
        }
        GroupAction::History => {
            let text = match ctl.history(group_id).await {
                Ok(items) => history_to_pretty(&items),
                Err(err) => return report(&bot, &msg, &dialogue, err).await,
            };
            bot.send_message(msg.chat.id, text).await?;
            dialogue.update(ChatState::Start).await?;
        }
        GroupAction::AddExpense => {
            bot.send_message(msg.chat.id, "Now, type the amount you spent:")
                .await?;
            dialogue
                .update(ChatState::ReceiveAmountSpent {
                    target: ExpenseTarget {
                        group_id,
                        expense_id: None,
                    },
                })
                .await?;
        }
        GroupAction::EditExpense | GroupAction::DeleteExpense => {
            bot.send_message(
                msg.chat.id,
                "Send the expense id (see /history, the number after #):",
            )
            .await?;
            dialogue
                .update(ChatState::ReceiveExpenseId { group_id, action })
                .await?;
        }
        GroupAction::Settle => {
            let text = format!(
                "Who did you pay? Send their id:\n{}",
                members_to_pretty(&members)
            );
            bot.send_message(msg.chat.id, text).await?;
            dialogue
                .update(ChatState::ReceiveReceiver { group_id })
                .await?;
        }
    }

    Ok(())
}

async fn receive_expense_id(
    bot: Bot,
    dialogue: MyDialogue,
    msg: Message,
    db: Database,
    ledger: Ledger,
    data: (GroupId, GroupAction),
) -> HandlerResult {
    let (group_id, action) = data;
    let Some(expense_id) = msg.text().and_then(|text| text.trim().parse::<i64>().ok()) else {
        bot.send_message(msg.chat.id, "Please, send an integer value: ")
            .await?;
        return Ok(());
    };
    let ctl = Controller::from_msg(&db, &ledger, &msg).await?;

    if action == GroupAction::DeleteExpense {
        match ctl.delete_expense(group_id, expense_id).await {
            Ok(removed) => {
                let text = format!(
                    "Expense #{} ({} for {}) has been deleted",
                    removed.id, removed.amount, removed.description
                );
                bot.send_message(msg.chat.id, text).await?;
                dialogue.update(ChatState::Start).await?;
            }
            Err(err) => return report(&bot, &msg, &dialogue, err).await,
        }
        return Ok(());
    }

    // Fail early on unknown ids instead of after the whole dialogue.
    if let Err(err) = ledger
        .expense_splits(ctl.member.id, group_id, expense_id)
        .await
    {
        return report(&bot, &msg, &dialogue, err).await;
    }

    bot.send_message(msg.chat.id, "Type the new amount you spent:")
        .await?;
    dialogue
        .update(ChatState::ReceiveAmountSpent {
            target: ExpenseTarget {
                group_id,
                expense_id: Some(expense_id),
            },
        })
        .await?;

    Ok(())
}

fn parse_positive_amount(text: Option<&str>) -> Option<Decimal> {
    text.and_then(|t| t.trim().parse::<Decimal>().ok())
        .filter(|amount| *amount > Decimal::ZERO)
}

async fn receive_amount_spent(
    bot: Bot,
    dialogue: MyDialogue,
    msg: Message,
    target: ExpenseTarget,
) -> HandlerResult {
    if let Some(amount) = parse_positive_amount(msg.text()) {
        bot.send_message(msg.chat.id, "Provide some description:")
            .await?;
        dialogue
            .update(ChatState::ReceiveDescription { target, amount })
            .await?;
    } else {
        bot.send_message(msg.chat.id, "Please, provide some positive decimal value:")
            .await?;
    }

    Ok(())
}

async fn receive_description(
    bot: Bot,
    dialogue: MyDialogue,
    msg: Message,
    data: (ExpenseTarget, Decimal),
) -> HandlerResult {
    let (target, amount) = data;
    if let Some(description) = msg.text().map(str::trim).filter(|d| !d.is_empty()) {
        bot.send_message(msg.chat.id, "When was it? Send YYYY-MM-DD or `today`:")
            .await?;
        dialogue
            .update(ChatState::ReceiveDate {
                target,
                amount,
                description: description.to_owned(),
            })
            .await?;
    } else {
        bot.send_message(msg.chat.id, "Please, provide a non-empty description:")
            .await?;
    }

    Ok(())
}

async fn receive_date(
    bot: Bot,
    dialogue: MyDialogue,
    msg: Message,
    data: (ExpenseTarget, Decimal, String),
) -> HandlerResult {
    let (target, amount, description) = data;
    let Some(text) = msg.text() else {
        return Ok(());
    };

    let date = if text.trim().eq_ignore_ascii_case("today") {
        Utc::now().date_naive()
    } else {
        match parse_expense_date(text) {
            Ok(date) => date,
            Err(err) => {
                bot.send_message(msg.chat.id, format!("{err}. Try again:"))
                    .await?;
                return Ok(());
            }
        }
    };

    bot.send_message(
        msg.chat.id,
        "Who shares it? Send member ids separated by commas, or `all`:",
    )
    .await?;
    dialogue
        .update(ChatState::ReceiveParticipants {
            target,
            amount,
            description,
            date,
        })
        .await?;

    Ok(())
}

async fn receive_participants(
    bot: Bot,
    dialogue: MyDialogue,
    msg: Message,
    db: Database,
    ledger: Ledger,
    data: (ExpenseTarget, Decimal, String, NaiveDate),
) -> HandlerResult {
    let (target, amount, description, date) = data;
    let Some(text) = msg.text() else {
        return Ok(());
    };
    let ctl = Controller::from_msg(&db, &ledger, &msg).await?;

    let participants = match ctl.resolve_participants(target.group_id, text).await {
        Ok(participants) => participants,
        Err(err) => return report(&bot, &msg, &dialogue, err).await,
    };
    let count = participants.len();

    let saved = ctl
        .save_expense(
            target.group_id,
            target.expense_id,
            amount,
            &description,
            date,
            participants,
        )
        .await;

    match saved {
        Ok(expense) => {
            let verb = if target.expense_id.is_some() {
                "updated"
            } else {
                "added"
            };
            let text = format!(
                "The expense #{} has been {verb}: {} split between {count} member(s)",
                expense.id, expense.amount
            );
            bot.send_message(msg.chat.id, text).await?;
            dialogue.update(ChatState::Start).await?;
            Ok(())
        }
        Err(err) => report(&bot, &msg, &dialogue, err).await,
    }
}

async fn receive_receiver(
    bot: Bot,
    dialogue: MyDialogue,
    msg: Message,
    group_id: GroupId,
) -> HandlerResult {
    if let Some(receiver_id) = msg.text().and_then(|text| text.trim().parse::<MemberId>().ok()) {
        bot.send_message(msg.chat.id, "How much did you pay?")
            .await?;
        dialogue
            .update(ChatState::ReceiveSettlementAmount {
                group_id,
                receiver_id,
            })
            .await?;
    } else {
        bot.send_message(msg.chat.id, "Please, send an integer value: ")
            .await?;
    }

    Ok(())
}

async fn receive_settlement_amount(
    bot: Bot,
    dialogue: MyDialogue,
    msg: Message,
    db: Database,
    ledger: Ledger,
    data: (GroupId, MemberId),
) -> HandlerResult {
    let (group_id, receiver_id) = data;
    let Some(amount) = parse_positive_amount(msg.text()) else {
        bot.send_message(msg.chat.id, "Please, provide some positive decimal value:")
            .await?;
        return Ok(());
    };
    let ctl = Controller::from_msg(&db, &ledger, &msg).await?;

    match ctl.settle(group_id, receiver_id, amount).await {
        Ok(recorded) => {
            let text = format!(
                "Recorded: {} paid {} to {}",
                recorded.payer_name, recorded.settlement.amount, recorded.receiver_name
            );
            bot.send_message(msg.chat.id, text).await?;
            dialogue.update(ChatState::Start).await?;
            Ok(())
        }
        Err(err) => report(&bot, &msg, &dialogue, err).await,
    }
}

async fn cancel(bot: Bot, msg: Message, dialogue: MyDialogue) -> HandlerResult {
    bot.send_message(msg.chat.id, "Canceled whatever you did")
        .await?;
    dialogue.exit().await?;
    Ok(())
}

async fn invalid_state(bot: Bot, msg: Message) -> HandlerResult {
    bot.send_message(
        msg.chat.id,
        "Unable to handle the message. Type /help to see the usage.",
    )
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn balance(member_id: MemberId, name: &str, amount: i64) -> MemberBalance {
        MemberBalance {
            member_id,
            display_name: name.to_string(),
            balance: Decimal::from(amount),
        }
    }

    #[test]
    fn balances_text_lists_members_and_transfers() {
        let text = balances_to_pretty(&[
            balance(1, "@alice", 200),
            balance(2, "@bob", -100),
            balance(3, "@carol", -100),
        ]);
        assert!(text.contains("@alice: +200"));
        assert!(text.contains("@bob: -100"));
        assert!(text.contains("@bob pays 100 to @alice"));
        assert!(text.contains("@carol pays 100 to @alice"));
    }

    #[test]
    fn even_group_has_no_transfers() {
        let text = balances_to_pretty(&[balance(1, "@alice", 0), balance(2, "@bob", 0)]);
        assert!(text.contains("No debt in this group"));
    }

    #[test]
    fn amounts_must_be_positive_decimals() {
        assert_eq!(parse_positive_amount(Some(" 12.50 ")), Some(Decimal::new(1250, 2)));
        assert_eq!(parse_positive_amount(Some("0")), None);
        assert_eq!(parse_positive_amount(Some("-3")), None);
        assert_eq!(parse_positive_amount(Some("ten")), None);
        assert_eq!(parse_positive_amount(None), None);
    }
}
