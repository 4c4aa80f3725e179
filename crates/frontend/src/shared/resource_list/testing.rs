//! In-memory collection and a test resource for controller tests

use async_trait::async_trait;
use contracts::domain::common::{default_active, DeletePolicy, Payload, Resource, ResourceId, ACTIVE_FLAG};
use contracts::shared::metadata::{FieldDescriptor, FieldKind, FieldValue, NumberRule, Rule};
use futures::channel::oneshot;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use super::client::ResourceClient;
use super::error::ResourceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub i64);

impl ResourceId for ItemId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        i64::from_string(s).map(ItemId)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<ItemId>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

const FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::new("name", "Name", FieldKind::Text).searchable(),
    FieldDescriptor::new("weight", "Weight", FieldKind::Decimal),
];

const RULES: &[Rule] = &[
    Rule::required("name", "Name is required"),
    NumberRule::new("weight", "Weight must be greater than 0")
        .greater_than(0.0)
        .rule(),
];

impl Resource for Item {
    type Id = ItemId;

    fn id(&self) -> Option<ItemId> {
        self.item_id
    }

    fn field_value(&self, field: &str) -> FieldValue {
        match field {
            "itemId" => self.item_id.map(|id| id.0).into(),
            "name" => self.name.as_str().into(),
            "weight" => self.weight.into(),
            "isActive" => self.is_active.into(),
            _ => FieldValue::Missing,
        }
    }

    fn is_active(&self) -> Option<bool> {
        Some(self.is_active)
    }

    fn aggregate_index() -> &'static str {
        "t001"
    }

    fn collection_name() -> &'static str {
        "items"
    }

    fn id_field() -> &'static str {
        "itemId"
    }

    fn element_name() -> &'static str {
        "Item"
    }

    fn list_name() -> &'static str {
        "Items"
    }

    fn fields() -> &'static [FieldDescriptor] {
        FIELDS
    }

    fn rules() -> &'static [Rule] {
        RULES
    }

    fn default_sort_field() -> &'static str {
        "name"
    }

    fn search_path() -> Option<&'static str> {
        Some("search")
    }
}

pub fn item(id: i64, name: &str, weight: Option<f64>) -> Item {
    Item {
        item_id: Some(ItemId(id)),
        name: name.to_string(),
        weight,
        is_active: true,
    }
}

/// Operation of the in-memory backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    List,
    Search,
    Create,
    Update,
    Delete,
}

/// Request as the backend received it
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List,
    Search(String),
    Create(Payload),
    Update(String, Payload),
    Delete(String),
}

struct MockState<E> {
    rows: Vec<E>,
    next_id: i64,
    calls: Vec<Call>,
    failures: VecDeque<(Op, ResourceError)>,
    gates: VecDeque<(Op, oneshot::Receiver<()>)>,
}

/// Backend double: rows live in memory, failures and delays are scripted per operation.
///
/// Reads answer with the rows as they were when the request arrived.
pub struct MockClient<E> {
    state: Rc<RefCell<MockState<E>>>,
}

impl<E> Clone for MockClient<E> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

impl<E: Resource> MockClient<E> {
    pub fn new(rows: Vec<E>) -> Self {
        let next_id = rows
            .iter()
            .filter_map(|row| match row.field_value(E::id_field()) {
                FieldValue::Number(n) => Some(n as i64),
                _ => None,
            })
            .max()
            .unwrap_or(0)
            + 1;
        Self {
            state: Rc::new(RefCell::new(MockState {
                rows,
                next_id,
                calls: Vec::new(),
                failures: VecDeque::new(),
                gates: VecDeque::new(),
            })),
        }
    }

    pub fn rows(&self) -> Vec<E> {
        self.state.borrow().rows.clone()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    pub fn count(&self, op: Op) -> usize {
        self.state
            .borrow()
            .calls
            .iter()
            .filter(|call| call.op() == op)
            .count()
    }

    /// The next `op` fails with `error` instead of touching the rows
    pub fn fail_next(&self, op: Op, error: ResourceError) {
        self.state.borrow_mut().failures.push_back((op, error));
    }

    /// The next `op` waits until the returned sender fires (or is dropped)
    pub fn hold_next(&self, op: Op) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.state.borrow_mut().gates.push_back((op, rx));
        tx
    }

    async fn enter(&self, call: Call) -> Result<(), ResourceError> {
        let op = call.op();
        let gate = {
            let mut state = self.state.borrow_mut();
            state.calls.push(call);
            take_first(&mut state.gates, op)
        };
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        match take_first(&mut self.state.borrow_mut().failures, op) {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn materialize(&self, payload: Payload, id: i64) -> Result<E, ResourceError> {
        let mut object = payload;
        object.insert(E::id_field().to_string(), Value::from(id));
        serde_json::from_value(Value::Object(object)).map_err(|e| ResourceError::Http {
            status: 400,
            message: e.to_string(),
        })
    }

    fn position(&self, id: &E::Id) -> Result<usize, ResourceError> {
        self.state
            .borrow()
            .rows
            .iter()
            .position(|row| row.id().as_ref() == Some(id))
            .ok_or(ResourceError::NotFound)
    }
}

impl Call {
    fn op(&self) -> Op {
        match self {
            Self::List => Op::List,
            Self::Search(_) => Op::Search,
            Self::Create(_) => Op::Create,
            Self::Update(..) => Op::Update,
            Self::Delete(_) => Op::Delete,
        }
    }
}

fn take_first<T>(queue: &mut VecDeque<(Op, T)>, op: Op) -> Option<T> {
    let index = queue.iter().position(|(o, _)| *o == op)?;
    queue.remove(index).map(|(_, value)| value)
}

#[async_trait(?Send)]
impl<E: Resource> ResourceClient<E> for MockClient<E> {
    async fn list(&self) -> Result<Vec<E>, ResourceError> {
        let rows = self.rows();
        self.enter(Call::List).await?;
        Ok(rows)
    }

    async fn create(&self, payload: &Payload) -> Result<E, ResourceError> {
        self.enter(Call::Create(payload.clone())).await?;
        let id = self.state.borrow().next_id;
        let created = self.materialize(payload.clone(), id)?;
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        state.rows.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: &E::Id, payload: &Payload) -> Result<E, ResourceError> {
        self.enter(Call::Update(id.as_string(), payload.clone())).await?;
        let index = self.position(id)?;
        let mut merged = self.state.borrow().rows[index].to_full_payload();
        merged.extend(payload.clone());
        let raw_id = merged
            .get(E::id_field())
            .and_then(Value::as_i64)
            .unwrap_or_default();
        let updated = self.materialize(merged, raw_id)?;
        self.state.borrow_mut().rows[index] = updated.clone();
        Ok(updated)
    }

    async fn delete(&self, id: &E::Id) -> Result<(), ResourceError> {
        self.enter(Call::Delete(id.as_string())).await?;
        let index = self.position(id)?;
        match E::delete_policy() {
            DeletePolicy::Hard => {
                self.state.borrow_mut().rows.remove(index);
            }
            DeletePolicy::Deactivate => {
                let mut merged = self.state.borrow().rows[index].to_full_payload();
                merged.insert(ACTIVE_FLAG.to_string(), Value::Bool(false));
                let raw_id = merged
                    .get(E::id_field())
                    .and_then(Value::as_i64)
                    .unwrap_or_default();
                let updated = self.materialize(merged, raw_id)?;
                self.state.borrow_mut().rows[index] = updated;
            }
        }
        Ok(())
    }

    async fn search(&self, query: &str) -> Result<Vec<E>, ResourceError> {
        let needle = query.trim().to_lowercase();
        let rows: Vec<E> = self
            .rows()
            .into_iter()
            .filter(|row| row.matches_search(&needle))
            .collect();
        self.enter(Call::Search(query.to_string())).await?;
        Ok(rows)
    }
}
