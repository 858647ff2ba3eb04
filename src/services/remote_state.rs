//! Estado de una colección remota
//!
//! Espejo local de una colección del backend con su ciclo de petición
//! `idle → loading → succeeded | failed`. Cada `list()` recibe un número de
//! secuencia; una respuesta cuya secuencia ya no es la última se descarta.
//! Las escrituras sólo tocan `items` después de la confirmación del servidor.

use serde::Serialize;

use crate::clients::ClientError;

/// Estado de la última carga de la colección
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

/// Vista serializable del estado
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RemoteSnapshot<T> {
    pub items: Vec<T>,
    pub status: RequestStatus,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug)]
pub struct RemoteCollection<T> {
    items: Vec<T>,
    status: RequestStatus,
    error: Option<String>,
    in_flight: usize,
    latest_list: u64,
}

impl<T> Default for RemoteCollection<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            status: RequestStatus::Idle,
            error: None,
            in_flight: 0,
            latest_list: 0,
        }
    }
}

impl<T: Clone> RemoteCollection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn status(&self) -> RequestStatus {
        self.status
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    pub fn snapshot(&self) -> RemoteSnapshot<T> {
        RemoteSnapshot {
            items: self.items.clone(),
            status: self.status,
            loading: self.is_loading(),
            error: self.error.clone(),
        }
    }

    /// Registrar un `list()` saliente y devolver su secuencia
    pub fn begin_list(&mut self) -> u64 {
        self.latest_list += 1;
        self.in_flight += 1;
        self.status = RequestStatus::Loading;
        self.latest_list
    }

    /// Aplicar la respuesta de un `list()`.
    ///
    /// Devuelve `false` si la respuesta era obsoleta y se descartó.
    pub fn finish_list(&mut self, sequence: u64, result: &Result<Vec<T>, ClientError>) -> bool {
        self.in_flight = self.in_flight.saturating_sub(1);

        if sequence != self.latest_list {
            return false;
        }

        match result {
            Ok(items) => {
                self.items = items.clone();
                self.status = RequestStatus::Succeeded;
                self.error = None;
            }
            Err(e) => {
                self.status = RequestStatus::Failed;
                self.error = Some(e.user_message());
            }
        }
        true
    }

    /// Registrar una escritura saliente (create/update/delete)
    pub fn begin_write(&mut self) {
        self.in_flight += 1;
    }

    /// Cerrar una escritura. El llamador aplica el cambio local sólo si fue `Ok`.
    pub fn finish_write<R>(&mut self, result: &Result<R, ClientError>) {
        self.in_flight = self.in_flight.saturating_sub(1);
        match result {
            Ok(_) => self.error = None,
            Err(e) => self.error = Some(e.user_message()),
        }
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Reemplazar el primer elemento que cumpla `matches`; `false` si no existe
    pub fn replace_where<F>(&mut self, matches: F, item: T) -> bool
    where
        F: Fn(&T) -> bool,
    {
        match self.items.iter_mut().find(|existing| matches(existing)) {
            Some(slot) => {
                *slot = item;
                true
            }
            None => false,
        }
    }

    pub fn remove_where<F>(&mut self, matches: F)
    where
        F: Fn(&T) -> bool,
    {
        self.items.retain(|item| !matches(item));
    }

    pub fn find<F>(&self, matches: F) -> Option<&T>
    where
        F: Fn(&T) -> bool,
    {
        self.items.iter().find(|item| matches(item))
    }
}
