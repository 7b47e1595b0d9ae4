#![allow(dead_code)]

//! In-memory stand-ins for the Supabase gateway and the payment
//! processor, shared by the integration tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::Utc;
use serde_json::{Value, json};
use uuid::Uuid;

use trekzone_core::gateway::{
    Collection, Filter, GatewayError, Order, RemoteCollections, SelectQuery,
};
use trekzone_core::payment::{
    CheckoutEvent, CheckoutOptions, PaymentError, PaymentGateway, PaymentOrder,
};

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

fn matches(row: &Value, clauses: &[(String, String)]) -> bool {
    clauses
        .iter()
        .all(|(column, expected)| render(&row[column.as_str()]) == *expected)
}

fn compare_values(a: &Value, b: &Value) -> std::cmp::Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(std::cmp::Ordering::Equal),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        _ => std::cmp::Ordering::Equal,
    }
}

fn sort_rows(rows: &mut [Value], order: &[Order]) {
    // Stable sort per key, least significant first, gives the same
    // result as one multi-key comparison.
    for key in order.iter().rev() {
        rows.sort_by(|a, b| {
            let ordering = compare_values(&a[key.column], &b[key.column]);
            if key.ascending {
                ordering
            } else {
                ordering.reverse()
            }
        });
    }
}

/// In-memory tables that answer like PostgREST: equality filters,
/// multi-key ordering, the trek/category join, and server-side column
/// defaults on insert. One failure can be armed to hit the next
/// operation, optionally scoped to a single collection.
#[derive(Default)]
pub struct FakeCollections {
    rows: Mutex<HashMap<Collection, Vec<Value>>>,
    pending_failure: Mutex<Option<Option<Collection>>>,
    selects: AtomicUsize,
    inserts: AtomicUsize,
    updates: AtomicUsize,
    deletes: AtomicUsize,
}

impl FakeCollections {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, collection: Collection, rows: Vec<Value>) {
        self.rows
            .lock()
            .unwrap()
            .entry(collection)
            .or_default()
            .extend(rows);
    }

    /// Arm a failure for the next operation, any collection when
    /// `scope` is `None`.
    pub fn fail_next(&self, scope: Option<Collection>) {
        *self.pending_failure.lock().unwrap() = Some(scope);
    }

    fn take_failure(&self, collection: Collection) -> Result<(), GatewayError> {
        let mut pending = self.pending_failure.lock().unwrap();
        let applies = match *pending {
            Some(None) => true,
            Some(Some(scope)) => scope == collection,
            None => false,
        };
        if applies {
            *pending = None;
            return Err(GatewayError::Status {
                status: 500,
                message: "injected failure".to_string(),
            });
        }
        Ok(())
    }

    pub fn rows_in(&self, collection: Collection) -> Vec<Value> {
        self.rows
            .lock()
            .unwrap()
            .get(&collection)
            .cloned()
            .unwrap_or_default()
    }

    pub fn select_count(&self) -> usize {
        self.selects.load(Ordering::SeqCst)
    }

    pub fn total_ops(&self) -> usize {
        self.selects.load(Ordering::SeqCst)
            + self.inserts.load(Ordering::SeqCst)
            + self.updates.load(Ordering::SeqCst)
            + self.deletes.load(Ordering::SeqCst)
    }
}

impl RemoteCollections for FakeCollections {
    async fn select(
        &self,
        collection: Collection,
        query: SelectQuery,
    ) -> Result<Vec<Value>, GatewayError> {
        self.selects.fetch_add(1, Ordering::SeqCst);
        self.take_failure(collection)?;

        let tables = self.rows.lock().unwrap();
        let mut clauses: Vec<(String, String)> = query.filter.clauses().to_vec();

        // A trek query filtered through the join table resolves the
        // category membership first, like the embedded filter would.
        let mut rows: Vec<Value> = if collection == Collection::Treks
            && let Some(pos) = clauses
                .iter()
                .position(|(column, _)| column == "trek_categories.category_id")
        {
            let (_, category_id) = clauses.remove(pos);
            let links = tables
                .get(&Collection::TrekCategories)
                .cloned()
                .unwrap_or_default();
            let trek_ids: Vec<String> = links
                .iter()
                .filter(|link| render(&link["category_id"]) == category_id)
                .map(|link| render(&link["trek_id"]))
                .collect();
            tables
                .get(&Collection::Treks)
                .cloned()
                .unwrap_or_default()
                .into_iter()
                .filter(|row| trek_ids.contains(&render(&row["id"])))
                .collect()
        } else {
            tables.get(&collection).cloned().unwrap_or_default()
        };

        // Join rows asked for with `treks(...)` get the trek embedded.
        if collection == Collection::TrekCategories && query.columns.contains("treks(") {
            let treks = tables
                .get(&Collection::Treks)
                .cloned()
                .unwrap_or_default();
            for row in &mut rows {
                let trek_id = render(&row["trek_id"]);
                row["treks"] = treks
                    .iter()
                    .find(|trek| render(&trek["id"]) == trek_id)
                    .cloned()
                    .unwrap_or(Value::Null);
            }
        }

        rows.retain(|row| matches(row, &clauses));
        sort_rows(&mut rows, &query.order);
        Ok(rows)
    }

    async fn insert(
        &self,
        collection: Collection,
        rows: Vec<Value>,
        returning: Option<&str>,
    ) -> Result<Vec<Value>, GatewayError> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        self.take_failure(collection)?;

        let mut tables = self.rows.lock().unwrap();
        let table = tables.entry(collection).or_default();
        let mut created = Vec::new();
        for mut row in rows {
            if row.get("id").is_none() {
                row["id"] = json!(Uuid::new_v4());
            }
            if row.get("created_at").is_none() {
                row["created_at"] = json!(Utc::now());
            }
            if collection == Collection::Enquiries && row.get("status").is_none() {
                row["status"] = json!("pending");
            }
            table.push(row.clone());
            created.push(row);
        }
        Ok(match returning {
            Some(_) => created,
            None => Vec::new(),
        })
    }

    async fn update(
        &self,
        collection: Collection,
        filter: Filter,
        patch: Value,
        _returning: &str,
    ) -> Result<Vec<Value>, GatewayError> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        self.take_failure(collection)?;

        let mut tables = self.rows.lock().unwrap();
        let table = tables.entry(collection).or_default();
        let mut updated = Vec::new();
        for row in table.iter_mut() {
            if matches(row, filter.clauses()) {
                if let (Some(target), Some(fields)) = (row.as_object_mut(), patch.as_object()) {
                    for (key, value) in fields {
                        target.insert(key.clone(), value.clone());
                    }
                }
                updated.push(row.clone());
            }
        }
        Ok(updated)
    }

    async fn delete(&self, collection: Collection, filter: Filter) -> Result<(), GatewayError> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.take_failure(collection)?;

        let mut tables = self.rows.lock().unwrap();
        if let Some(table) = tables.get_mut(&collection) {
            table.retain(|row| !matches(row, filter.clauses()));
        }
        Ok(())
    }
}

// ── row builders ──

pub fn trek_row(id: Uuid, title: &str, price: f64, max: i32, current: i32) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": "A long walk through the high passes",
        "location": "Himachal Pradesh",
        "difficulty": "Moderate",
        "duration": "5 days",
        "start_date": "2026-10-01",
        "end_date": "2026-10-05",
        "price": price,
        "max_participants": max,
        "current_participants": current,
        "image_url": "https://example.com/trek.jpg",
        "created_at": "2026-01-01T00:00:00Z",
    })
}

pub fn category_row(id: Uuid, title: &str, is_active: bool) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": "Treks grouped by theme",
        "is_active": is_active,
        "created_at": "2026-01-01T00:00:00Z",
    })
}

pub fn link_row(trek_id: Uuid, category_id: Uuid) -> Value {
    json!({ "trek_id": trek_id, "category_id": category_id })
}

pub fn enquiry_row(id: Uuid, trek_id: Uuid, status: &str) -> Value {
    json!({
        "id": id,
        "trek_id": trek_id,
        "name": "Asha Rao",
        "email": "asha@example.com",
        "phone": "+91 98765 43210",
        "message": "Is this trek beginner friendly?",
        "status": status,
        "created_at": "2026-02-01T00:00:00Z",
    })
}

/// Scripted payment processor. Checkout outcomes are played back in the
/// order they were pushed; script and order failures fire once each.
#[derive(Default)]
pub struct FakePayments {
    script_loads: AtomicUsize,
    next_order: AtomicUsize,
    script_failure: Mutex<Option<String>>,
    order_failure: Mutex<Option<String>>,
    events: Mutex<VecDeque<CheckoutEvent>>,
    orders: Mutex<Vec<PaymentOrder>>,
    opened: Mutex<Vec<CheckoutOptions>>,
}

impl FakePayments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_event(&self, event: CheckoutEvent) {
        self.events.lock().unwrap().push_back(event);
    }

    pub fn fail_script_load(&self, message: &str) {
        *self.script_failure.lock().unwrap() = Some(message.to_string());
    }

    pub fn fail_order_creation(&self, message: &str) {
        *self.order_failure.lock().unwrap() = Some(message.to_string());
    }

    pub fn script_loads(&self) -> usize {
        self.script_loads.load(Ordering::SeqCst)
    }

    pub fn orders(&self) -> Vec<PaymentOrder> {
        self.orders.lock().unwrap().clone()
    }

    pub fn opened(&self) -> Vec<CheckoutOptions> {
        self.opened.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.script_loads() + self.orders().len() + self.opened().len()
    }
}

impl PaymentGateway for FakePayments {
    async fn load_assets(&self) -> Result<(), PaymentError> {
        if let Some(message) = self.script_failure.lock().unwrap().take() {
            return Err(PaymentError::ScriptLoad(message));
        }
        self.script_loads.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn create_order(
        &self,
        amount: f64,
        currency: &str,
    ) -> Result<PaymentOrder, PaymentError> {
        if let Some(message) = self.order_failure.lock().unwrap().take() {
            return Err(PaymentError::OrderCreation(message));
        }
        let n = self.next_order.fetch_add(1, Ordering::SeqCst) + 1;
        let order = PaymentOrder {
            order_id: format!("order_{n}"),
            amount_minor: (amount * 100.0).round() as i64,
            currency: currency.to_string(),
        };
        self.orders.lock().unwrap().push(order.clone());
        Ok(order)
    }

    async fn open_checkout(&self, options: CheckoutOptions) -> Result<CheckoutEvent, PaymentError> {
        self.opened.lock().unwrap().push(options);
        let event = self.events.lock().unwrap().pop_front();
        match event {
            Some(event) => Ok(event),
            None => Ok(CheckoutEvent::Failed(
                "no scripted checkout event".to_string(),
            )),
        }
    }
}
