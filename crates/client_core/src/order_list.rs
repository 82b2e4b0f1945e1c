//! View-model for the paginated order listings. Both dashboard pages share
//! this model; they differ only in page size and in whether a confirmed save
//! patches the local row.
//!
//! The model is synchronous and side-effect free. Network work is expressed
//! as a [`StatusUpdate`] the caller dispatches, with the outcome fed back in
//! through `apply_save_ok` / `apply_save_failed`.

use shared::domain::{OrderId, OrderStatus};
use shared::protocol::Order;
use tracing::debug;

/// Summary view ("today's orders").
pub const HOME_PAGE_SIZE: usize = 10;
/// Full order listing.
pub const ORDER_PAGE_SIZE: usize = 5;

/// Inline status editor. At most one row is ever in edit; starting an edit on
/// another row silently discards the previous buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorState {
    Viewing,
    Editing {
        order_id: OrderId,
        edited_status: OrderStatus,
    },
    /// Save requested, confirmation prompt showing. The buffered status is
    /// frozen until the operator answers.
    ConfirmingSave {
        order_id: OrderId,
        edited_status: OrderStatus,
    },
}

/// A confirmed status change ready to be sent to the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusUpdate {
    pub order_id: OrderId,
    pub status: OrderStatus,
}

#[derive(Debug)]
pub struct OrderListModel {
    orders: Vec<Order>,
    page_size: usize,
    patch_on_save: bool,
    current_page: usize,
    loading: bool,
    editor: EditorState,
}

impl OrderListModel {
    /// `patch_on_save` controls whether a confirmed save rewrites the local
    /// row; the summary view leaves rows stale until the next reload.
    pub fn new(page_size: usize, patch_on_save: bool) -> Self {
        assert!(page_size > 0, "page size must be positive");
        Self {
            orders: Vec::new(),
            page_size,
            patch_on_save,
            current_page: 1,
            loading: true,
            editor: EditorState::Viewing,
        }
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn editor(&self) -> &EditorState {
        &self.editor
    }

    pub fn begin_load(&mut self) {
        self.loading = true;
    }

    /// Replaces the listing wholesale with a fresh server snapshot. Resets
    /// pagination and abandons any edit in progress.
    pub fn apply_loaded(&mut self, orders: Vec<Order>) {
        debug!(count = orders.len(), "order list reloaded");
        self.orders = orders;
        self.current_page = 1;
        self.editor = EditorState::Viewing;
        self.loading = false;
    }

    pub fn apply_load_failed(&mut self) {
        self.orders.clear();
        self.current_page = 1;
        self.editor = EditorState::Viewing;
        self.loading = false;
    }

    /// Zero when the listing is empty; no placeholder page is shown.
    pub fn page_count(&self) -> usize {
        self.orders.len().div_ceil(self.page_size)
    }

    pub fn visible_page(&self) -> &[Order] {
        page_slice(&self.orders, self.page_size, self.current_page)
    }

    pub fn prev_page(&mut self) {
        if self.current_page > 1 {
            self.current_page -= 1;
        }
    }

    pub fn next_page(&mut self) {
        if self.current_page < self.page_count() {
            self.current_page += 1;
        }
    }

    pub fn goto_page(&mut self, page: usize) {
        if (1..=self.page_count()).contains(&page) {
            self.current_page = page;
        }
    }

    pub fn editing_order_id(&self) -> Option<&OrderId> {
        match &self.editor {
            EditorState::Viewing => None,
            EditorState::Editing { order_id, .. } | EditorState::ConfirmingSave { order_id, .. } => {
                Some(order_id)
            }
        }
    }

    pub fn edited_status(&self) -> Option<OrderStatus> {
        match &self.editor {
            EditorState::Viewing => None,
            EditorState::Editing { edited_status, .. }
            | EditorState::ConfirmingSave { edited_status, .. } => Some(*edited_status),
        }
    }

    pub fn is_confirming(&self) -> bool {
        matches!(self.editor, EditorState::ConfirmingSave { .. })
    }

    /// Puts the given row into edit, seeding the buffer from its current
    /// status. Returns false when the id is not in the listing.
    pub fn begin_edit(&mut self, order_id: &OrderId) -> bool {
        let Some(order) = self.orders.iter().find(|order| &order.id == order_id) else {
            return false;
        };
        self.editor = EditorState::Editing {
            order_id: order.id.clone(),
            edited_status: order.status,
        };
        true
    }

    /// Updates the edit buffer only; nothing is sent and the row keeps
    /// displaying its last known status.
    pub fn set_edited_status(&mut self, status: OrderStatus) {
        if let EditorState::Editing { edited_status, .. } = &mut self.editor {
            *edited_status = status;
        }
    }

    /// Raises the confirmation prompt for the buffered status.
    pub fn request_save(&mut self) {
        if let EditorState::Editing {
            order_id,
            edited_status,
        } = self.editor.clone()
        {
            self.editor = EditorState::ConfirmingSave {
                order_id,
                edited_status,
            };
        }
    }

    /// Dismisses the prompt. The row stays in edit with the buffer intact,
    /// so the operator can adjust and save again.
    pub fn cancel_save(&mut self) {
        if let EditorState::ConfirmingSave {
            order_id,
            edited_status,
        } = self.editor.clone()
        {
            self.editor = EditorState::Editing {
                order_id,
                edited_status,
            };
        }
    }

    /// Accepts the prompt, yielding exactly one update for the caller to
    /// dispatch. The row drops back to plain edit while the call is in
    /// flight; nothing local changes until the outcome arrives.
    pub fn confirm_save(&mut self) -> Option<StatusUpdate> {
        let EditorState::ConfirmingSave {
            order_id,
            edited_status,
        } = self.editor.clone()
        else {
            return None;
        };
        self.editor = EditorState::Editing {
            order_id: order_id.clone(),
            edited_status,
        };
        Some(StatusUpdate {
            order_id,
            status: edited_status,
        })
    }

    /// Server confirmed the update. When `patch_on_save` is set, the matching
    /// row's status (and only its status) is rewritten and the editor closes,
    /// regardless of what the operator has done since the call went out.
    pub fn apply_save_ok(&mut self, update: &StatusUpdate) {
        if !self.patch_on_save {
            return;
        }
        if let Some(order) = self
            .orders
            .iter_mut()
            .find(|order| order.id == update.order_id)
        {
            order.status = update.status;
        }
        self.editor = EditorState::Viewing;
    }

    /// Server rejected the update. Edit state and listing are left exactly
    /// as they were before the call.
    pub fn apply_save_failed(&mut self) {}
}

/// Rows for 1-based `page`: the half-open index range
/// `[(page-1)*page_size, page*page_size)` clipped to the listing.
pub fn page_slice(orders: &[Order], page_size: usize, page: usize) -> &[Order] {
    if page == 0 || page_size == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(page_size).min(orders.len());
    let end = page.saturating_mul(page_size).min(orders.len());
    &orders[start..end]
}

#[cfg(test)]
#[path = "tests/order_list_tests.rs"]
mod tests;
