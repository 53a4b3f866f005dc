// src/services/region_resolver.rs

use crate::models::region::{Region, UnknownRegion, DEFAULT_REGION_KEY};

/// Primeiro segmento não vazio do caminho, ou a chave padrão.
///
/// Não valida contra o enum: `"/qualquer/coisa"` devolve `"qualquer"`.
pub fn resolve_region_key(path: &str) -> &str {
    path.split('/')
        .find(|segment| !segment.is_empty())
        .unwrap_or(DEFAULT_REGION_KEY)
}

/// Igual a `resolve_region_key`, mas exige uma região conhecida.
pub fn resolve_region(path: &str) -> Result<Region, UnknownRegion> {
    Region::from_key(resolve_region_key(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_segment_is_the_region_key() {
        assert_eq!(resolve_region_key("/wales/dashboard"), "wales");
        assert_eq!(resolve_region_key("//scotland//beds"), "scotland");
        assert_eq!(resolve_region_key("ireland"), "ireland");
    }

    #[test]
    fn empty_paths_default_to_england() {
        assert_eq!(resolve_region_key("/"), "england");
        assert_eq!(resolve_region_key(""), "england");
        assert_eq!(resolve_region_key("///"), "england");
    }

    #[test]
    fn unknown_segments_are_errors_when_parsed() {
        assert_eq!(resolve_region("/northern-ireland/x"), Ok(Region::UkNorthernIreland));
        assert_eq!(resolve_region("/"), Ok(Region::UkEngland));
        assert_eq!(
            resolve_region("/dashboard"),
            Err(UnknownRegion("dashboard".into()))
        );
    }
}
