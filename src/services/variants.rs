// src/services/variants.rs

use crate::{
    common::error::AppError,
    models::region::Region,
    services::region_resolver,
};

/// Uma implementação por região, sem buracos.
///
/// Construída só por `try_from_entries`, que recusa tabela incompleta.
#[derive(Debug, Clone)]
pub struct RegionalVariants<T> {
    slots: [T; Region::COUNT],
}

impl<T> RegionalVariants<T> {
    /// Entradas repetidas: a última vence. Faltando alguma região, erro.
    pub fn try_from_entries(entries: impl IntoIterator<Item = (Region, T)>) -> Result<Self, AppError> {
        let mut slots: [Option<T>; Region::COUNT] = Default::default();
        for (region, variant) in entries {
            slots[region.index()] = Some(variant);
        }

        let mut filled = Vec::with_capacity(Region::COUNT);
        for region in Region::ALL {
            match slots[region.index()].take() {
                Some(variant) => filled.push(variant),
                None => return Err(AppError::MissingVariant(region)),
            }
        }

        let slots = filled
            .try_into()
            .map_err(|_| anyhow::anyhow!("regional table has the wrong number of slots"))?;
        Ok(Self { slots })
    }

    pub fn select(&self, region: Region) -> &T {
        &self.slots[region.index()]
    }

    /// Atalho: resolve a região a partir do caminho e seleciona.
    pub fn select_for_path(&self, path: &str) -> Result<(Region, &T), AppError> {
        let region = region_resolver::resolve_region(path)?;
        Ok((region, self.select(region)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete<T>(make: impl Fn(Region) -> T) -> RegionalVariants<T> {
        RegionalVariants::try_from_entries(Region::ALL.map(|r| (r, make(r)))).unwrap()
    }

    #[test]
    fn selects_the_registered_variant() {
        let table = complete(|r| r.key().to_uppercase());
        for region in Region::ALL {
            assert_eq!(table.select(region), &region.key().to_uppercase());
        }
    }

    #[test]
    fn later_entries_replace_earlier_ones() {
        let entries = Region::ALL
            .into_iter()
            .map(|r| (r, "first"))
            .chain([(Region::UkWales, "second")]);
        let table = RegionalVariants::try_from_entries(entries).unwrap();
        assert_eq!(*table.select(Region::UkWales), "second");
        assert_eq!(*table.select(Region::UkEngland), "first");
    }

    #[test]
    fn incomplete_tables_are_rejected() {
        let entries = Region::ALL
            .into_iter()
            .filter(|r| *r != Region::UkScotland)
            .map(|r| (r, r.code()));
        let err = RegionalVariants::try_from_entries(entries).unwrap_err();
        assert!(matches!(err, AppError::MissingVariant(Region::UkScotland)));
    }

    #[test]
    fn unknown_path_regions_are_errors_not_blanks() {
        let table = complete(|r| r.index());
        assert!(matches!(
            table.select_for_path("/mars/bed-management"),
            Err(AppError::UnknownRegion(_))
        ));
    }

    #[test]
    fn resolves_from_paths_with_england_as_default() {
        let table = complete(|r| r.index());
        let (region, idx) = table.select_for_path("/").unwrap();
        assert_eq!((region, *idx), (Region::UkEngland, 0));
        let (region, _) = table.select_for_path("/ireland/bed-management").unwrap();
        assert_eq!(region, Region::Ireland);
    }
}
