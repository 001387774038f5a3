//! Shared in-memory test doubles.
//!
//! One fake per external collaborator: the record store, the navigation
//! stack, and the alert prompt. Screen tests drive the real controllers
//! against these.

#![allow(clippy::unwrap_used)]

use std::collections::VecDeque;
use std::sync::Mutex;

use chrono::Utc;
use secrecy::SecretString;
use uuid::Uuid;

use compras_core::{CartEntryId, Email, Price, ProductId, UserId};

use crate::backend::{AuthApi, CartApi, ProductApi, SignUpOutcome};
use crate::error::AppError;
use crate::models::{CartEntry, CartEntryView, NewCartEntry, NewProduct, Product};
use crate::navigation::{Confirmation, Navigator, Prompt, Route};
use crate::session::{Session, SessionStore, SessionUser};

/// A session for a known test user.
pub fn test_session(email: &str) -> Session {
    Session {
        access_token: SecretString::from("test-token"),
        user: Some(SessionUser {
            id: UserId::new(Uuid::from_u128(1)),
            email: Email::parse(email).unwrap(),
        }),
    }
}

/// The user id carried by [`test_session`].
pub fn test_user_id() -> UserId {
    UserId::new(Uuid::from_u128(1))
}

/// A sample catalog product.
pub fn sample_product(id: i64, name: &str) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        description: format!("{name} description"),
        price: Price::parse("10.00").unwrap(),
        created_at: None,
    }
}

#[derive(Default)]
struct BackendState {
    products: Vec<Product>,
    cart: Vec<CartEntry>,
    next_product_id: i64,
    next_entry_id: i64,
    credentials: Vec<(String, String)>,
    sign_up_requires_confirmation: bool,
    fail_next: Option<AppError>,
    remote_calls: Vec<&'static str>,
}

/// In-memory record store implementing the backend traits.
///
/// Owns a [`SessionStore`] so auth calls have the same session side effects
/// as the real client.
pub struct InMemoryBackend {
    state: Mutex<BackendState>,
    pub sessions: SessionStore,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(BackendState {
                next_product_id: 1,
                next_entry_id: 1,
                ..BackendState::default()
            }),
            sessions: SessionStore::new(),
        }
    }

    pub fn with_products(products: Vec<Product>) -> Self {
        let backend = Self::new();
        {
            let mut state = backend.state.lock().unwrap();
            state.next_product_id =
                products.iter().map(|p| p.id.as_i64()).max().unwrap_or(0) + 1;
            state.products = products;
        }
        backend
    }

    /// Register credentials accepted by `sign_in`.
    pub fn register_user(&self, email: &str, password: &str) {
        self.state
            .lock()
            .unwrap()
            .credentials
            .push((email.to_string(), password.to_string()));
    }

    /// Make `sign_up` answer with a confirmation-pending outcome.
    pub fn require_email_confirmation(&self) {
        self.state.lock().unwrap().sign_up_requires_confirmation = true;
    }

    /// Fail the next remote operation with the given error.
    pub fn fail_next(&self, err: AppError) {
        self.state.lock().unwrap().fail_next = Some(err);
    }

    /// Install a cart entry directly, bypassing the API.
    pub fn seed_cart_entry(&self, product: ProductId, user: UserId) -> CartEntryId {
        let mut state = self.state.lock().unwrap();
        let id = CartEntryId::new(state.next_entry_id);
        state.next_entry_id += 1;
        state.cart.push(CartEntry {
            id,
            id_produto: product,
            created_user: user,
            created_at: Utc::now(),
        });
        id
    }

    /// How many times the named remote operation was invoked.
    pub fn calls(&self, op: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .remote_calls
            .iter()
            .filter(|name| **name == op)
            .count()
    }

    pub fn products(&self) -> Vec<Product> {
        self.state.lock().unwrap().products.clone()
    }

    pub fn cart_entries(&self) -> Vec<CartEntry> {
        self.state.lock().unwrap().cart.clone()
    }

    /// Record the call and take any scripted failure.
    fn enter(&self, op: &'static str) -> Result<(), AppError> {
        let mut state = self.state.lock().unwrap();
        state.remote_calls.push(op);
        match state.fail_next.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthApi for InMemoryBackend {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AppError> {
        self.enter("sign_in")?;
        let known = self
            .state
            .lock()
            .unwrap()
            .credentials
            .iter()
            .any(|(e, p)| e == email && p == password);
        if !known {
            return Err(AppError::Remote("Invalid login credentials".to_string()));
        }
        let session = test_session(email);
        self.sessions.replace(session.clone());
        Ok(session)
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        _full_name: &str,
    ) -> Result<SignUpOutcome, AppError> {
        self.enter("sign_up")?;
        self.register_user(email, password);
        if self.state.lock().unwrap().sign_up_requires_confirmation {
            return Ok(SignUpOutcome::ConfirmationRequired);
        }
        let session = test_session(email);
        self.sessions.replace(session.clone());
        Ok(SignUpOutcome::SignedIn(session))
    }

    async fn sign_out(&self) -> Result<(), AppError> {
        self.enter("sign_out")?;
        self.sessions.clear();
        Ok(())
    }
}

impl ProductApi for InMemoryBackend {
    async fn list_products(&self) -> Result<Vec<Product>, AppError> {
        self.enter("list_products")?;
        let mut products = self.state.lock().unwrap().products.clone();
        products.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(products)
    }

    async fn get_product(&self, id: ProductId) -> Result<Product, AppError> {
        self.enter("get_product")?;
        self.state
            .lock()
            .unwrap()
            .products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Product".to_string()))
    }

    async fn insert_product(&self, product: &NewProduct) -> Result<(), AppError> {
        self.enter("insert_product")?;
        let mut state = self.state.lock().unwrap();
        let id = ProductId::new(state.next_product_id);
        state.next_product_id += 1;
        state.products.push(Product {
            id,
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            created_at: Some(product.created_at),
        });
        Ok(())
    }

    async fn update_product(&self, id: ProductId, patch: &NewProduct) -> Result<(), AppError> {
        self.enter("update_product")?;
        let mut state = self.state.lock().unwrap();
        let product = state
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::NotFound("Product".to_string()))?;
        product.name = patch.name.clone();
        product.description = patch.description.clone();
        product.price = patch.price;
        Ok(())
    }

    async fn delete_product(&self, id: ProductId) -> Result<(), AppError> {
        self.enter("delete_product")?;
        self.state.lock().unwrap().products.retain(|p| p.id != id);
        Ok(())
    }
}

impl CartApi for InMemoryBackend {
    async fn list_cart(&self, user: UserId) -> Result<Vec<CartEntryView>, AppError> {
        self.enter("list_cart")?;
        let state = self.state.lock().unwrap();
        let mut entries: Vec<&CartEntry> = state
            .cart
            .iter()
            .filter(|entry| entry.created_user == user)
            .collect();
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(entries
            .into_iter()
            .filter_map(|entry| {
                state
                    .products
                    .iter()
                    .find(|p| p.id == entry.id_produto)
                    .map(|product| CartEntryView {
                        entry_id: entry.id,
                        created_at: entry.created_at,
                        product: product.clone(),
                    })
            })
            .collect())
    }

    async fn add_to_cart(&self, entry: &NewCartEntry) -> Result<(), AppError> {
        self.enter("add_to_cart")?;
        let mut state = self.state.lock().unwrap();
        let id = CartEntryId::new(state.next_entry_id);
        state.next_entry_id += 1;
        state.cart.push(CartEntry {
            id,
            id_produto: entry.id_produto,
            created_user: entry.created_user,
            created_at: entry.created_at,
        });
        Ok(())
    }

    async fn remove_from_cart(&self, id: CartEntryId) -> Result<(), AppError> {
        self.enter("remove_from_cart")?;
        self.state.lock().unwrap().cart.retain(|e| e.id != id);
        Ok(())
    }
}

/// One recorded navigation action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    To(Route),
    Back,
}

/// Navigator fake that records every action.
#[derive(Default)]
pub struct RecordingNavigator {
    events: Mutex<Vec<NavEvent>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<NavEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn went_back(&self) -> bool {
        self.events().contains(&NavEvent::Back)
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.events.lock().unwrap().push(NavEvent::To(route));
    }

    fn go_back(&self) {
        self.events.lock().unwrap().push(NavEvent::Back);
    }
}

/// Prompt fake with scripted confirmation answers and recorded notices.
///
/// When the script runs out, further confirmations answer `Confirmed`.
#[derive(Default)]
pub struct ScriptedPrompt {
    answers: Mutex<VecDeque<Confirmation>>,
    notices: Mutex<Vec<(String, String)>>,
}

impl ScriptedPrompt {
    /// A prompt that confirms everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// A prompt answering with the given choices, in order.
    pub fn answering(answers: impl IntoIterator<Item = Confirmation>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().collect()),
            notices: Mutex::new(Vec::new()),
        }
    }

    /// Every `(title, message)` notice shown so far.
    pub fn notices(&self) -> Vec<(String, String)> {
        self.notices.lock().unwrap().clone()
    }

    /// The message of the most recent notice.
    pub fn last_notice(&self) -> Option<String> {
        self.notices().last().map(|(_, message)| message.clone())
    }
}

impl Prompt for ScriptedPrompt {
    async fn confirm(&self, _title: &str, _message: &str) -> Confirmation {
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Confirmation::Confirmed)
    }

    fn notify(&self, title: &str, message: &str) {
        self.notices
            .lock()
            .unwrap()
            .push((title.to_string(), message.to_string()));
    }
}
