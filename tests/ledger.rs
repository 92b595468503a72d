use chrono::{NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};

use splittea_ledger::{
    controller::Controller,
    db::Database,
    entity::{expense, split, GroupId, MemberId},
    ledger::{ExpenseDraft, HistoryItem, Ledger, LedgerError},
};

const ALICE: MemberId = 1;
const BOB: MemberId = 2;
const CAROL: MemberId = 3;
const DAVE: MemberId = 4;

/// Alice, Bob and Carol share group "Trip". Dave is registered but outside it.
async fn ledger_with_group() -> (Database, Ledger, GroupId) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    db.apply_migrations().await.unwrap();
    for (id, name) in [(ALICE, "alice"), (BOB, "bob"), (CAROL, "carol"), (DAVE, "dave")] {
        db.register_member(id, name).await.unwrap();
    }

    let group = db.create_group("Trip", ALICE).await.unwrap();
    db.add_member_to_group(group.id, BOB).await.unwrap();
    db.add_member_to_group(group.id, CAROL).await.unwrap();

    let ledger = db.ledger();
    (db, ledger, group.id)
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn draft(payer_id: MemberId, amount: i64, participants: &[MemberId]) -> ExpenseDraft {
    ExpenseDraft {
        payer_id,
        amount: Decimal::from(amount),
        description: "Dinner".to_string(),
        date: day(2024, 1, 1),
        participants: participants.to_vec(),
    }
}

async fn balances(ledger: &Ledger, group_id: GroupId) -> Vec<(MemberId, Decimal)> {
    ledger
        .balances(ALICE, group_id)
        .await
        .unwrap()
        .into_iter()
        .map(|b| (b.member_id, b.balance))
        .collect()
}

fn expected(values: [i64; 3]) -> Vec<(MemberId, Decimal)> {
    vec![
        (ALICE, Decimal::from(values[0])),
        (BOB, Decimal::from(values[1])),
        (CAROL, Decimal::from(values[2])),
    ]
}

fn total(balances: &[(MemberId, Decimal)]) -> Decimal {
    balances.iter().map(|(_, b)| *b).sum()
}

async fn splits_of(db: &Database, expense_id: i64) -> Vec<split::Model> {
    split::Entity::find()
        .filter(split::Column::ExpenseId.eq(expense_id))
        .all(db.connection())
        .await
        .unwrap()
}

#[tokio::test]
async fn equal_split_scenario() {
    let (_db, ledger, group_id) = ledger_with_group().await;

    let created = ledger
        .create_expense(ALICE, group_id, &draft(ALICE, 300, &[ALICE, BOB, CAROL]))
        .await
        .unwrap();
    assert_eq!(created.group_id, group_id);
    assert_eq!(created.payer_id, ALICE);
    assert_eq!(created.amount, Decimal::from(300));
    assert_eq!(created.date, day(2024, 1, 1));

    assert_eq!(balances(&ledger, group_id).await, expected([200, -100, -100]));
}

#[tokio::test]
async fn edit_recomputes_balances() {
    let (_db, ledger, group_id) = ledger_with_group().await;
    let created = ledger
        .create_expense(ALICE, group_id, &draft(ALICE, 300, &[ALICE, BOB, CAROL]))
        .await
        .unwrap();

    let edited = ledger
        .edit_expense(
            BOB,
            group_id,
            created.id,
            &draft(ALICE, 150, &[ALICE, BOB, CAROL]),
        )
        .await
        .unwrap();
    assert_eq!(edited.id, created.id);
    assert_eq!(edited.amount, Decimal::from(150));

    assert_eq!(balances(&ledger, group_id).await, expected([100, -50, -50]));
}

#[tokio::test]
async fn settlement_scenario_keeps_sum_at_zero() {
    let (_db, ledger, group_id) = ledger_with_group().await;
    ledger
        .create_expense(ALICE, group_id, &draft(ALICE, 300, &[ALICE, BOB, CAROL]))
        .await
        .unwrap();

    let recorded = ledger
        .record_settlement(BOB, group_id, BOB, ALICE, Decimal::from(100), Utc::now())
        .await
        .unwrap();
    assert_eq!(recorded.payer_name, "bob");
    assert_eq!(recorded.receiver_name, "alice");
    assert_eq!(recorded.settlement.amount, Decimal::from(100));

    let after = balances(&ledger, group_id).await;
    assert_eq!(after, expected([300, -200, -100]));
    assert_eq!(total(&after), Decimal::ZERO);
}

#[tokio::test]
async fn history_lists_newest_first() {
    let (_db, ledger, group_id) = ledger_with_group().await;
    let created = ledger
        .create_expense(ALICE, group_id, &draft(ALICE, 300, &[ALICE, BOB, CAROL]))
        .await
        .unwrap();
    let settled_at = Utc.with_ymd_and_hms(2024, 1, 2, 9, 30, 0).unwrap();
    let recorded = ledger
        .record_settlement(BOB, group_id, BOB, ALICE, Decimal::from(100), settled_at)
        .await
        .unwrap();

    let history = ledger.history(CAROL, group_id).await.unwrap();
    assert_eq!(history.len(), 2);

    match &history[0] {
        HistoryItem::Settlement {
            id,
            date,
            payer_name,
            receiver_name,
            ..
        } => {
            assert_eq!(*id, recorded.settlement.id);
            assert_eq!(*date, settled_at);
            assert_eq!(payer_name, "bob");
            assert_eq!(receiver_name, "alice");
        }
        other => panic!("expected the settlement first, got {other:?}"),
    }
    match &history[1] {
        HistoryItem::Expense {
            id,
            description,
            payer_name,
            ..
        } => {
            assert_eq!(*id, created.id);
            assert_eq!(description, "Dinner");
            assert_eq!(payer_name, "alice");
        }
        other => panic!("expected the expense second, got {other:?}"),
    }
}

#[tokio::test]
async fn create_writes_one_split_per_participant() {
    let (db, ledger, group_id) = ledger_with_group().await;

    let created = ledger
        .create_expense(ALICE, group_id, &draft(BOB, 100, &[ALICE, BOB, CAROL]))
        .await
        .unwrap();

    let splits = ledger
        .expense_splits(ALICE, group_id, created.id)
        .await
        .unwrap();
    assert_eq!(splits.len(), 3);
    let debtors: Vec<_> = splits.iter().map(|s| s.debtor_id).collect();
    assert_eq!(debtors, vec![ALICE, BOB, CAROL]);

    // 100 / 3: the first participant absorbs the leftover cent.
    assert_eq!(splits[0].amount_due, Decimal::new(3334, 2));
    assert_eq!(splits[1].amount_due, Decimal::new(3333, 2));
    assert_eq!(splits[2].amount_due, Decimal::new(3333, 2));
    let owed: Decimal = splits.iter().map(|s| s.amount_due).sum();
    assert_eq!(owed, Decimal::from(100));

    assert_eq!(splits_of(&db, created.id).await.len(), 3);
    assert_eq!(total(&balances(&ledger, group_id).await), Decimal::ZERO);
}

#[tokio::test]
async fn payer_does_not_have_to_participate() {
    let (_db, ledger, group_id) = ledger_with_group().await;

    ledger
        .create_expense(ALICE, group_id, &draft(ALICE, 90, &[BOB, CAROL]))
        .await
        .unwrap();

    assert_eq!(balances(&ledger, group_id).await, expected([90, -45, -45]));
}

#[tokio::test]
async fn edit_replaces_every_split() {
    let (db, ledger, group_id) = ledger_with_group().await;
    let created = ledger
        .create_expense(ALICE, group_id, &draft(ALICE, 300, &[ALICE, BOB]))
        .await
        .unwrap();
    let old_ids: Vec<_> = splits_of(&db, created.id)
        .await
        .into_iter()
        .map(|s| s.id)
        .collect();
    assert_eq!(old_ids.len(), 2);

    ledger
        .edit_expense(
            ALICE,
            group_id,
            created.id,
            &draft(ALICE, 300, &[ALICE, BOB, CAROL]),
        )
        .await
        .unwrap();

    let splits = splits_of(&db, created.id).await;
    assert_eq!(splits.len(), 3);
    assert!(splits.iter().all(|s| s.amount_due == Decimal::from(100)));
    assert!(splits.iter().all(|s| !old_ids.contains(&s.id)));
}

#[tokio::test]
async fn edit_can_change_payer_description_and_date() {
    let (_db, ledger, group_id) = ledger_with_group().await;
    let created = ledger
        .create_expense(ALICE, group_id, &draft(ALICE, 60, &[ALICE, BOB, CAROL]))
        .await
        .unwrap();

    let mut replacement = draft(CAROL, 60, &[ALICE, BOB]);
    replacement.description = " Museum tickets ".to_string();
    replacement.date = day(2024, 3, 15);
    let edited = ledger
        .edit_expense(ALICE, group_id, created.id, &replacement)
        .await
        .unwrap();

    assert_eq!(edited.payer_id, CAROL);
    assert_eq!(edited.description, "Museum tickets");
    assert_eq!(edited.date, day(2024, 3, 15));
    assert_eq!(balances(&ledger, group_id).await, expected([-30, -30, 60]));
}

#[tokio::test]
async fn delete_removes_expense_and_splits() {
    let (db, ledger, group_id) = ledger_with_group().await;
    ledger
        .create_expense(ALICE, group_id, &draft(ALICE, 300, &[ALICE, BOB, CAROL]))
        .await
        .unwrap();
    ledger
        .record_settlement(CAROL, group_id, CAROL, ALICE, Decimal::from(40), Utc::now())
        .await
        .unwrap();
    let baseline = balances(&ledger, group_id).await;

    let extra = ledger
        .create_expense(BOB, group_id, &draft(BOB, 75, &[BOB, CAROL]))
        .await
        .unwrap();
    assert_ne!(balances(&ledger, group_id).await, baseline);

    let removed = ledger
        .delete_expense(CAROL, group_id, extra.id)
        .await
        .unwrap();
    assert_eq!(removed.id, extra.id);

    assert!(splits_of(&db, extra.id).await.is_empty());
    assert!(expense::Entity::find_by_id(extra.id)
        .one(db.connection())
        .await
        .unwrap()
        .is_none());
    assert_eq!(balances(&ledger, group_id).await, baseline);

    let err = ledger
        .expense_splits(ALICE, group_id, extra.id)
        .await
        .unwrap_err();
    assert_eq!(err, LedgerError::NotFound(format!("expense {}", extra.id)));
}

#[tokio::test]
async fn missing_or_foreign_expenses_are_not_found() {
    let (db, ledger, group_id) = ledger_with_group().await;

    // Dave's own group, which Alice also joins.
    let other = db.create_group("Flat", DAVE).await.unwrap();
    db.add_member_to_group(other.id, ALICE).await.unwrap();
    let foreign = ledger
        .create_expense(DAVE, other.id, &draft(DAVE, 20, &[DAVE, ALICE]))
        .await
        .unwrap();

    let err = ledger
        .edit_expense(ALICE, group_id, foreign.id, &draft(ALICE, 10, &[ALICE]))
        .await
        .unwrap_err();
    assert_eq!(err, LedgerError::NotFound(format!("expense {}", foreign.id)));

    let err = ledger
        .delete_expense(ALICE, group_id, foreign.id)
        .await
        .unwrap_err();
    assert_eq!(err, LedgerError::NotFound(format!("expense {}", foreign.id)));

    let err = ledger.delete_expense(ALICE, group_id, 9999).await.unwrap_err();
    assert_eq!(err, LedgerError::NotFound("expense 9999".to_string()));

    // The foreign expense is untouched.
    assert_eq!(splits_of(&db, foreign.id).await.len(), 2);
}

#[tokio::test]
async fn non_members_are_forbidden() {
    let (_db, ledger, group_id) = ledger_with_group().await;
    let created = ledger
        .create_expense(ALICE, group_id, &draft(ALICE, 30, &[ALICE, BOB]))
        .await
        .unwrap();

    let forbidden = |err: LedgerError| matches!(err, LedgerError::Forbidden(_));

    assert!(forbidden(
        ledger
            .create_expense(DAVE, group_id, &draft(ALICE, 30, &[ALICE]))
            .await
            .unwrap_err()
    ));
    assert!(forbidden(
        ledger
            .edit_expense(DAVE, group_id, created.id, &draft(ALICE, 30, &[ALICE]))
            .await
            .unwrap_err()
    ));
    assert!(forbidden(
        ledger
            .delete_expense(DAVE, group_id, created.id)
            .await
            .unwrap_err()
    ));
    assert!(forbidden(
        ledger
            .record_settlement(DAVE, group_id, BOB, ALICE, Decimal::ONE, Utc::now())
            .await
            .unwrap_err()
    ));
    assert!(forbidden(ledger.balances(DAVE, group_id).await.unwrap_err()));
    assert!(forbidden(ledger.history(DAVE, group_id).await.unwrap_err()));
    assert!(forbidden(ledger.members(DAVE, group_id).await.unwrap_err()));

    // A group that does not exist looks the same as one you are not in.
    assert!(forbidden(ledger.balances(ALICE, 424242).await.unwrap_err()));
}

#[tokio::test]
async fn invalid_expenses_write_nothing() {
    let (db, ledger, group_id) = ledger_with_group().await;

    let cases = [
        draft(ALICE, 0, &[ALICE]),
        draft(ALICE, -10, &[ALICE]),
        draft(ALICE, 10, &[]),
        draft(ALICE, 10, &[ALICE, ALICE]),
        draft(ALICE, 10, &[ALICE, DAVE]),
        draft(DAVE, 10, &[ALICE]),
        ExpenseDraft {
            description: "  ".to_string(),
            ..draft(ALICE, 10, &[ALICE])
        },
    ];
    for input in cases {
        let err = ledger
            .create_expense(ALICE, group_id, &input)
            .await
            .unwrap_err();
        assert!(
            matches!(err, LedgerError::Validation(_)),
            "{input:?} gave {err:?}"
        );
    }

    let stored = expense::Entity::find()
        .all(db.connection())
        .await
        .unwrap();
    assert!(stored.is_empty());
}

#[tokio::test]
async fn non_member_participant_is_named() {
    let (_db, ledger, group_id) = ledger_with_group().await;

    let err = ledger
        .create_expense(ALICE, group_id, &draft(ALICE, 10, &[ALICE, DAVE]))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        LedgerError::Validation(format!(
            "participant {DAVE} is not a member of group {group_id}"
        ))
    );
}

#[tokio::test]
async fn failed_split_write_rolls_back_create() {
    let (db, ledger, group_id) = ledger_with_group().await;
    db.connection()
        .execute_unprepared(
            "CREATE TRIGGER reject_carol_split BEFORE INSERT ON split \
             WHEN NEW.debtor_id = 3 BEGIN SELECT RAISE(ABORT, 'split rejected'); END;",
        )
        .await
        .unwrap();

    let err = ledger
        .create_expense(ALICE, group_id, &draft(ALICE, 300, &[ALICE, BOB, CAROL]))
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::Database(_)));

    assert!(expense::Entity::find()
        .all(db.connection())
        .await
        .unwrap()
        .is_empty());
    assert!(split::Entity::find()
        .all(db.connection())
        .await
        .unwrap()
        .is_empty());
    assert_eq!(balances(&ledger, group_id).await, expected([0, 0, 0]));
}

#[tokio::test]
async fn failed_split_write_rolls_back_edit() {
    let (db, ledger, group_id) = ledger_with_group().await;
    let created = ledger
        .create_expense(ALICE, group_id, &draft(ALICE, 200, &[ALICE, BOB]))
        .await
        .unwrap();
    db.connection()
        .execute_unprepared(
            "CREATE TRIGGER reject_carol_split BEFORE INSERT ON split \
             WHEN NEW.debtor_id = 3 BEGIN SELECT RAISE(ABORT, 'split rejected'); END;",
        )
        .await
        .unwrap();

    let err = ledger
        .edit_expense(
            ALICE,
            group_id,
            created.id,
            &draft(BOB, 900, &[ALICE, BOB, CAROL]),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::Database(_)));

    let stored = expense::Entity::find_by_id(created.id)
        .one(db.connection())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.amount, Decimal::from(200));
    assert_eq!(stored.payer_id, ALICE);

    let splits = splits_of(&db, created.id).await;
    assert_eq!(splits.len(), 2);
    assert!(splits.iter().all(|s| s.amount_due == Decimal::from(100)));
}

#[tokio::test]
async fn settlement_validation() {
    let (_db, ledger, group_id) = ledger_with_group().await;
    let now = Utc::now();

    let err = ledger
        .record_settlement(ALICE, group_id, BOB, BOB, Decimal::from(5), now)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        LedgerError::Validation("payer and receiver cannot be the same member".to_string())
    );

    let err = ledger
        .record_settlement(ALICE, group_id, DAVE, BOB, Decimal::from(5), now)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        LedgerError::Validation(format!("payer {DAVE} is not a member of group {group_id}"))
    );

    let err = ledger
        .record_settlement(ALICE, group_id, BOB, DAVE, Decimal::from(5), now)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        LedgerError::Validation(format!(
            "receiver {DAVE} is not a member of group {group_id}"
        ))
    );

    let err = ledger
        .record_settlement(ALICE, group_id, BOB, ALICE, Decimal::ZERO, now)
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::Validation(_)));

    assert!(ledger.history(ALICE, group_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn settlement_moves_exactly_the_amount() {
    let (_db, ledger, group_id) = ledger_with_group().await;
    ledger
        .create_expense(ALICE, group_id, &draft(CAROL, 120, &[ALICE, BOB, CAROL]))
        .await
        .unwrap();
    let before = balances(&ledger, group_id).await;

    let amount = Decimal::new(1725, 2);
    ledger
        .record_settlement(ALICE, group_id, ALICE, CAROL, amount, Utc::now())
        .await
        .unwrap();
    let after = balances(&ledger, group_id).await;

    assert_eq!(after[0].1, before[0].1 - amount);
    assert_eq!(after[1].1, before[1].1);
    assert_eq!(after[2].1, before[2].1 + amount);
}

#[tokio::test]
async fn balances_stay_conserved_through_a_sequence() {
    let (_db, ledger, group_id) = ledger_with_group().await;

    let first = ledger
        .create_expense(ALICE, group_id, &draft(ALICE, 100, &[ALICE, BOB, CAROL]))
        .await
        .unwrap();
    assert_eq!(total(&balances(&ledger, group_id).await), Decimal::ZERO);

    let second = ledger
        .create_expense(BOB, group_id, &draft(BOB, 7, &[ALICE, CAROL]))
        .await
        .unwrap();
    assert_eq!(total(&balances(&ledger, group_id).await), Decimal::ZERO);

    ledger
        .record_settlement(CAROL, group_id, CAROL, ALICE, Decimal::new(3333, 2), Utc::now())
        .await
        .unwrap();
    assert_eq!(total(&balances(&ledger, group_id).await), Decimal::ZERO);

    ledger
        .edit_expense(ALICE, group_id, first.id, &draft(CAROL, 55, &[BOB]))
        .await
        .unwrap();
    assert_eq!(total(&balances(&ledger, group_id).await), Decimal::ZERO);

    ledger.delete_expense(BOB, group_id, second.id).await.unwrap();
    let last = balances(&ledger, group_id).await;
    assert_eq!(total(&last), Decimal::ZERO);

    // Only the edited expense (Carol paid 55 for Bob) and the settlement remain.
    assert_eq!(
        last,
        vec![
            (ALICE, Decimal::new(3333, 2)),
            (BOB, Decimal::from(-55)),
            (CAROL, Decimal::from(55) - Decimal::new(3333, 2)),
        ]
    );
}

#[tokio::test]
async fn members_include_everyone_with_zero_balances() {
    let (_db, ledger, group_id) = ledger_with_group().await;

    let members = ledger.members(BOB, group_id).await.unwrap();
    let names: Vec<_> = members.iter().map(|m| m.display_name.as_str()).collect();
    assert_eq!(names, vec!["alice", "bob", "carol"]);

    assert_eq!(balances(&ledger, group_id).await, expected([0, 0, 0]));
}

#[tokio::test]
async fn joining_twice_and_unknown_groups() {
    let (db, _ledger, group_id) = ledger_with_group().await;

    let joined = db.add_member_to_group(group_id, BOB).await.unwrap();
    assert_eq!(joined.map(|g| g.name), Some("Trip".to_string()));
    assert!(db.add_member_to_group(777, BOB).await.unwrap().is_none());

    let groups = db.get_member_groups(BOB).await.unwrap();
    assert_eq!(groups.len(), 1);

    let renamed = db.register_member(BOB, "@bobby").await.unwrap();
    assert_eq!(renamed.display_name, "@bobby");
    let ledger = db.ledger();
    let names: Vec<_> = ledger
        .members(ALICE, group_id)
        .await
        .unwrap()
        .into_iter()
        .map(|m| m.display_name)
        .collect();
    assert_eq!(names, vec!["alice", "@bobby", "carol"]);
}

#[tokio::test]
async fn editing_someone_elses_expense_keeps_its_payer() {
    let (db, ledger, group_id) = ledger_with_group().await;
    let created = ledger
        .create_expense(ALICE, group_id, &draft(ALICE, 300, &[ALICE, BOB, CAROL]))
        .await
        .unwrap();

    let bob = Controller::register(&db, &ledger, BOB, "bob").await.unwrap();
    let edited = bob
        .save_expense(
            group_id,
            Some(created.id),
            Decimal::from(300),
            "dinner out",
            day(2024, 1, 1),
            vec![ALICE, BOB, CAROL],
        )
        .await
        .unwrap();

    assert_eq!(edited.payer_id, ALICE);
    assert_eq!(edited.description, "dinner out");
    assert_eq!(
        ledger.expense(CAROL, group_id, created.id).await.unwrap().payer_id,
        ALICE
    );
    assert_eq!(balances(&ledger, group_id).await, expected([200, -100, -100]));
}

#[tokio::test]
async fn new_expenses_from_the_controller_are_paid_by_the_author() {
    let (db, ledger, group_id) = ledger_with_group().await;

    let carol = Controller::register(&db, &ledger, CAROL, "carol").await.unwrap();
    let created = carol
        .save_expense(
            group_id,
            None,
            Decimal::from(90),
            "Museum",
            day(2024, 2, 1),
            vec![ALICE, BOB, CAROL],
        )
        .await
        .unwrap();

    assert_eq!(created.payer_id, CAROL);
    assert_eq!(balances(&ledger, group_id).await, expected([-30, -30, 60]));
}

#[tokio::test]
async fn amounts_beyond_stored_precision_are_rejected() {
    let (db, ledger, group_id) = ledger_with_group().await;
    let everyone = [ALICE, BOB, CAROL];

    for too_precise in ["99999999999999999.99", "10000000000000", "0.1234567890123456"] {
        let mut input = draft(ALICE, 1, &everyone);
        input.amount = too_precise.parse().unwrap();
        let err = ledger.create_expense(ALICE, group_id, &input).await.unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)), "{too_precise}: {err:?}");

        let err = ledger
            .record_settlement(
                BOB,
                group_id,
                BOB,
                ALICE,
                input.amount,
                Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)), "{too_precise}: {err:?}");
    }
    assert!(ledger.history(ALICE, group_id).await.unwrap().is_empty());

    let largest: Decimal = "9999999999999.99".parse().unwrap();
    let mut input = draft(ALICE, 1, &everyone);
    input.amount = largest;
    let created = ledger.create_expense(ALICE, group_id, &input).await.unwrap();

    let stored = ledger.expense(ALICE, group_id, created.id).await.unwrap();
    assert_eq!(stored.amount, largest);
    let splits = splits_of(&db, created.id).await;
    assert_eq!(splits.len(), 3);
    assert_eq!(splits.iter().map(|s| s.amount_due).sum::<Decimal>(), largest);
    assert_eq!(total(&balances(&ledger, group_id).await), Decimal::ZERO);
}
