// src/common/query_state.rs

use serde::Serialize;

use super::error::AppError;

/// Estado de uma consulta para quem vai apresentar o dado.
///
/// A camada de dados devolve `Result`; quem monta a tela decide que
/// falha vira `Error` em vez de derrubar a página inteira.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "lowercase")]
pub enum QueryState<T> {
    Ready(T),
    Empty,
    Error { message: String },
}

impl<T> QueryState<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            QueryState::Ready(v) => Some(v),
            _ => None,
        }
    }
}

impl<T> QueryState<Vec<T>> {
    pub fn from_list(result: Result<Vec<T>, AppError>) -> Self {
        match result {
            Ok(items) if items.is_empty() => QueryState::Empty,
            Ok(items) => QueryState::Ready(items),
            Err(e) => QueryState::from_error(&e),
        }
    }
}

impl<T> QueryState<T> {
    fn from_error(e: &AppError) -> Self {
        tracing::warn!("query failed, showing error state: {:?}", e);
        QueryState::Error {
            message: "This information is temporarily unavailable.".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_lists_become_empty_state() {
        let state: QueryState<Vec<u32>> = QueryState::from_list(Ok(vec![]));
        assert_eq!(state, QueryState::Empty);
    }

    #[test]
    fn failures_become_error_state() {
        let state: QueryState<Vec<u32>> =
            QueryState::from_list(Err(AppError::InternalServerError(anyhow::anyhow!("pool closed"))));
        assert!(matches!(state, QueryState::Error { .. }));
        assert!(state.ready().is_none());
    }

    #[test]
    fn serializes_with_a_state_tag() {
        let state = QueryState::Ready(vec![1, 2]);
        assert_eq!(
            serde_json::to_value(&state).unwrap(),
            json!({ "state": "ready", "data": [1, 2] })
        );
        let empty: QueryState<Vec<u8>> = QueryState::Empty;
        assert_eq!(serde_json::to_value(&empty).unwrap(), json!({ "state": "empty" }));
    }
}
