use chrono::NaiveDate;
use serde_json::json;
use tallybook_core::{
    extract_tags, monthly_report, recurring_expenses, Expense, ExpenseService, ExpenseTemplate,
    MemoryStore, ServiceError,
};

fn march_2024() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
}

fn expense(id: &str, date: &str, amount: f64, category: &str, description: &str) -> Expense {
    Expense {
        id: id.to_string(),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        amount,
        category: category.to_string(),
        description: description.to_string(),
        notes: String::new(),
    }
}

fn sample() -> Vec<Expense> {
    vec![
        expense("1", "2024-01-05", 10.0, "Food", "Coffee"),
        expense("2", "2024-02-05", 10.0, "Food", "Coffee"),
        expense("3", "2024-03-01", 5.0, "Food", "Snack"),
    ]
}

fn service(expenses: Vec<Expense>) -> ExpenseService<MemoryStore<Expense>> {
    ExpenseService::new(MemoryStore::with_records(expenses)).with_clock(march_2024)
}

#[test]
fn monthly_report_matches_worked_example() {
    let report = service(sample()).monthly_report();
    assert_eq!(
        serde_json::to_value(&report).unwrap(),
        json!({
            "2024-01": {"total": 10.0, "categories": {"Food": 10.0}},
            "2024-02": {"total": 10.0, "categories": {"Food": 10.0}},
            "2024-03": {"total": 5.0, "categories": {"Food": 5.0}},
        })
    );
}

#[test]
fn monthly_report_keys_ascend_and_totals_sum_to_input() {
    let expenses = vec![
        expense("a", "2025-01-09", 3.5, "Rent", "x"),
        expense("b", "2023-12-31", 1.25, "Food", "y"),
        expense("c", "2024-10-02", 2.0, "Food", "z"),
        expense("d", "2024-02-11", 4.0, "Fun", "w"),
    ];
    let report = monthly_report(&expenses);

    let keys: Vec<&str> = report.keys().map(|key| key.as_str()).collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
    assert_eq!(keys, vec!["2023-12", "2024-02", "2024-10", "2025-01"]);

    let report_total: f64 = report.values().map(|bucket| bucket.total).sum();
    let input_total: f64 = expenses.iter().map(|expense| expense.amount).sum();
    assert!((report_total - input_total).abs() < 1e-9);
}

#[test]
fn monthly_report_of_nothing_is_empty() {
    assert!(monthly_report(&[]).is_empty());
}

#[test]
fn comparison_matches_worked_example() {
    let comparison = service(sample())
        .compare_months(Some("2024-01"), Some("2024-09"))
        .unwrap();

    assert_eq!(
        serde_json::to_value(&comparison).unwrap(),
        json!({
            "2024-01": {
                "total": 10.0,
                "categories": {"Food": 10.0},
                "details": [{
                    "id": "1",
                    "date": "2024-01-05",
                    "amount": 10.0,
                    "category": "Food",
                    "description": "Coffee",
                    "notes": "",
                }],
            },
            "2024-09": {"total": 0.0, "categories": {}, "details": []},
        })
    );
}

#[test]
fn comparison_keeps_stored_order_in_details() {
    let expenses = vec![
        expense("late", "2024-02-28", 1.0, "Food", "x"),
        expense("early", "2024-02-01", 2.0, "Food", "y"),
    ];
    let comparison = service(expenses)
        .compare_months(Some("2024-02"), Some("2024-01"))
        .unwrap();

    assert_eq!(comparison.len(), 2);
    let feb: Vec<&str> = comparison
        .values()
        .flat_map(|entry| entry.details.iter().map(|expense| expense.id.as_str()))
        .collect();
    assert_eq!(feb, vec!["late", "early"]);
}

#[test]
fn comparison_requires_both_months() {
    let err = service(sample())
        .compare_months(Some("2024-01"), None)
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidRequest(message) if message.contains("month2")));

    let err = service(sample())
        .compare_months(Some(""), Some("2024-01"))
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidRequest(message) if message.contains("month1")));
}

#[test]
fn recurring_matches_worked_example() {
    let recurring = service(sample()).recurring_expenses(Some("3")).unwrap();
    assert_eq!(
        recurring,
        vec![ExpenseTemplate {
            description: "Coffee".to_string(),
            category: "Food".to_string(),
            amount: 10.0,
        }]
    );
}

#[test]
fn recurring_defaults_to_three_months() {
    let recurring = service(sample()).recurring_expenses(None).unwrap();
    assert_eq!(recurring.len(), 1);

    // A one-month window opens on 2024-02-01 and only sees February's coffee.
    let narrow = service(sample()).recurring_expenses(Some("1")).unwrap();
    assert!(narrow.is_empty());
}

#[test]
fn recurring_drops_a_group_once_it_falls_to_one_month() {
    let mut expenses = sample();
    assert_eq!(recurring_expenses(&expenses, 3, march_2024()).len(), 1);

    expenses.retain(|expense| expense.id != "2");
    assert!(recurring_expenses(&expenses, 3, march_2024()).is_empty());
}

#[test]
fn recurring_preserves_first_occurrence_order() {
    let expenses = vec![
        expense("1", "2024-01-02", 9.99, "Media", "Stream"),
        expense("2", "2024-01-03", 30.0, "Bills", "Phone"),
        expense("3", "2024-02-03", 30.0, "Bills", "Phone"),
        expense("4", "2024-03-02", 9.99, "Media", "Stream"),
    ];
    let recurring = recurring_expenses(&expenses, 3, march_2024());
    let names: Vec<&str> = recurring.iter().map(|t| t.description.as_str()).collect();
    assert_eq!(names, vec!["Stream", "Phone"]);
}

#[test]
fn tags_are_unique_and_cover_recurring_templates() {
    let mut expenses = sample();
    expenses.push(expense("4", "2024-03-02", 10.0, "Food", "Coffee"));

    let tags = extract_tags(&expenses, 3, march_2024());
    assert_eq!(tags.len(), 2);

    let recurring = recurring_expenses(&expenses, 3, march_2024());
    for template in &recurring {
        assert!(tags.contains(template));
    }
}

#[test]
fn tags_default_to_two_months() {
    // Window opens 2024-01-01 for March 2024.
    let tags = service(sample()).expense_tags(None).unwrap();
    let names: Vec<&str> = tags.iter().map(|t| t.description.as_str()).collect();
    assert_eq!(names, vec!["Coffee", "Snack"]);

    let older = vec![expense("x", "2023-12-31", 1.0, "Food", "Old")];
    assert!(service(older).expense_tags(None).unwrap().is_empty());
}

#[test]
fn invalid_window_sizes_are_rejected() {
    for raw in ["0", "abc", "-1", "2.5"] {
        let recurring = service(sample()).recurring_expenses(Some(raw)).unwrap_err();
        assert!(matches!(recurring, ServiceError::InvalidRequest(_)), "{raw}");

        let tags = service(sample()).expense_tags(Some(raw)).unwrap_err();
        assert!(matches!(tags, ServiceError::InvalidRequest(_)), "{raw}");
    }
}
