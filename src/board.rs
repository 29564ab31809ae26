use crate::{
    adjacency,
    error::Error,
    placer,
    store::{Cell, CellStore, Position},
};
use rand::{rngs::StdRng, SeedableRng};

#[derive(Debug, Clone, typed_builder::TypedBuilder)]
pub(crate) struct BoardConfig {
    rows: usize,
    columns: usize,
    hazards: usize,
    /// Seed for hazard placement; drawn at random when absent.
    #[builder(default)]
    seed: Option<u64>,
}

impl BoardConfig {
    pub(crate) fn validate(&self) -> Result<(), Error> {
        let invalid = |reason| Error::InvalidConfiguration {
            rows: self.rows,
            columns: self.columns,
            hazards: self.hazards,
            reason,
        };

        if self.rows == 0 || self.columns == 0 {
            return Err(invalid("the board needs at least one row and one column"));
        }
        let cells = self
            .rows
            .checked_mul(self.columns)
            .ok_or_else(|| invalid("the board has too many cells"))?;
        if self.hazards >= cells {
            return Err(invalid("there must be fewer hazards than cells"));
        }
        Ok(())
    }
}

/// The cells of one game, with hazards placed and adjacency built.
#[derive(Debug)]
pub(crate) struct Board {
    store: CellStore,
    hazards: usize,
    seed: u64,
}

impl Board {
    pub(crate) fn new(config: &BoardConfig) -> Result<Self, Error> {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);

        let mut store = CellStore::new(config.rows, config.columns);
        placer::place_hazards(&mut store, config.hazards, &mut rng);
        adjacency::build(&mut store);

        log::debug!(
            "built {}x{} board with {} hazards from seed {seed}",
            config.rows,
            config.columns,
            config.hazards
        );

        Ok(Self {
            store,
            hazards: config.hazards,
            seed,
        })
    }

    /// A board with hazards at exactly the given positions.
    #[cfg(test)]
    pub(crate) fn with_hazards(
        rows: usize,
        columns: usize,
        hazards: &[Position],
    ) -> Result<Self, Error> {
        BoardConfig::builder()
            .rows(rows)
            .columns(columns)
            .hazards(hazards.len())
            .build()
            .validate()?;

        let mut store = CellStore::new(rows, columns);
        for &position in hazards {
            store.cell_mut(position)?.kind = crate::store::Kind::Hazard;
        }
        adjacency::build(&mut store);

        Ok(Self {
            store,
            hazards: hazards.len(),
            seed: 0,
        })
    }

    pub(crate) fn rows(&self) -> usize {
        self.store.rows()
    }

    pub(crate) fn columns(&self) -> usize {
        self.store.columns()
    }

    pub(crate) fn hazards(&self) -> usize {
        self.hazards
    }

    pub(crate) fn seed(&self) -> u64 {
        self.seed
    }

    pub(crate) fn cell(&self, position: Position) -> Result<&Cell, Error> {
        self.store.cell(position)
    }

    pub(crate) fn store(&self) -> &CellStore {
        &self.store
    }

    pub(crate) fn store_mut(&mut self) -> &mut CellStore {
        &mut self.store
    }
}
