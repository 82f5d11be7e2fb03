use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use forgather_models::{ClientDashboard, SupplierDashboard};
use forgather_rpc::protocol::calls;
use forgather_rpc::Backend;

use crate::error::CoreError;
use crate::notify::Notifier;
use crate::{observability, AppContext};

/// Data behind the client portal view. Holds the last successful snapshot;
/// a failed refetch keeps it and emits one toast.
pub struct ClientPortal<B, N> {
    ctx: Arc<AppContext<B, N>>,
    snapshot: RwLock<Option<ClientDashboard>>,
    loading: AtomicBool,
}

impl<B: Backend, N: Notifier> ClientPortal<B, N> {
    pub fn new(ctx: Arc<AppContext<B, N>>) -> Self {
        Self {
            ctx,
            snapshot: RwLock::new(None),
            loading: AtomicBool::new(false),
        }
    }

    pub fn snapshot(&self) -> Option<ClientDashboard> {
        match self.snapshot.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Relaxed)
    }

    pub async fn refetch(&self) -> Result<ClientDashboard, CoreError> {
        let Some(user) = self.ctx.session.current_user() else {
            let err = CoreError::LoginRequired;
            self.ctx.notify_error(&err);
            return Err(err);
        };

        self.loading.store(true, Ordering::Relaxed);
        observability::rpc_issued(calls::GET_CLIENT_DASHBOARD);
        let result = self.ctx.backend.get_client_dashboard(user.id).await;
        self.loading.store(false, Ordering::Relaxed);

        match result {
            Ok(dashboard) => {
                let mut guard = match self.snapshot.write() {
                    Ok(guard) => guard,
                    Err(poisoned) => poisoned.into_inner(),
                };
                *guard = Some(dashboard.clone());
                Ok(dashboard)
            }
            Err(err) => {
                observability::rpc_failed(calls::GET_CLIENT_DASHBOARD);
                let err = CoreError::from(err);
                self.ctx.notify_error(&err);
                Err(err)
            }
        }
    }
}

/// Supplier-side counterpart: open RFQs and submitted quotes.
pub struct SupplierPortal<B, N> {
    ctx: Arc<AppContext<B, N>>,
    snapshot: RwLock<Option<SupplierDashboard>>,
    loading: AtomicBool,
}

impl<B: Backend, N: Notifier> SupplierPortal<B, N> {
    pub fn new(ctx: Arc<AppContext<B, N>>) -> Self {
        Self {
            ctx,
            snapshot: RwLock::new(None),
            loading: AtomicBool::new(false),
        }
    }

    pub fn snapshot(&self) -> Option<SupplierDashboard> {
        match self.snapshot.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Relaxed)
    }

    pub async fn refetch(&self) -> Result<SupplierDashboard, CoreError> {
        let Some(user) = self.ctx.session.current_user() else {
            let err = CoreError::LoginRequired;
            self.ctx.notify_error(&err);
            return Err(err);
        };

        self.loading.store(true, Ordering::Relaxed);
        observability::rpc_issued(calls::GET_SUPPLIER_DASHBOARD);
        let result = self.ctx.backend.get_supplier_dashboard(user.id).await;
        self.loading.store(false, Ordering::Relaxed);

        match result {
            Ok(dashboard) => {
                let mut guard = match self.snapshot.write() {
                    Ok(guard) => guard,
                    Err(poisoned) => poisoned.into_inner(),
                };
                *guard = Some(dashboard.clone());
                Ok(dashboard)
            }
            Err(err) => {
                observability::rpc_failed(calls::GET_SUPPLIER_DASHBOARD);
                let err = CoreError::from(err);
                self.ctx.notify_error(&err);
                Err(err)
            }
        }
    }
}
