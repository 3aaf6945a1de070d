use crate::Grid::grid_coordinate::{GridCoordinate, coordinate_set};
use crate::Grid::grid_coordinate_list::GridCoordinateList;
use crate::Grid::grid_element_balancer::{BalancedGridElement, GridElementToBalance};
use log::debug;
use rand::Rng;
use rand::seq::SliceRandom;

/// Reallocates any number of pools in one batch.
/// Shrinking pools keep their coordinates and only lower the visible fraction; growing pools
/// take fresh cells from one shuffled source, so no two pools of the batch ever get the same cell
/// and no pool gets a cell still occupied by another pool before or after the transition.
#[derive(Debug, Clone, PartialEq)]
pub struct GridElementSetter {
    elements: Vec<GridElementToBalance>,
    grid: GridCoordinateList,
}

impl GridElementSetter {
    pub fn new(elements: Vec<GridElementToBalance>, cols: usize, rows: usize) -> Self {
        Self {
            elements,
            grid: GridCoordinateList::new(cols, rows),
        }
    }

    pub fn elements(&self) -> &[GridElementToBalance] {
        &self.elements
    }

    /// one balanced element per input pool, same order
    pub fn balance<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<BalancedGridElement> {
        let committed = coordinate_set(self.elements.iter().map(|e| e.initial_coords.as_slice()));
        let mut source = self.grid.free_coordinates(&committed);
        source.shuffle(rng);
        let mut source = source.into_iter();

        self.elements
            .iter()
            .map(|element| {
                let delta = element.delta();
                if delta <= 0 {
                    BalancedGridElement::shrinking(element.initial_coords.clone(), element.final_count)
                } else {
                    let mut coords = element.initial_coords.clone();
                    coords.extend(source.by_ref().take(delta as usize));
                    if coords.len() < element.final_count {
                        debug!(
                            "grid exhausted: pool got {} of {} coordinates",
                            coords.len(),
                            element.final_count
                        );
                    }
                    BalancedGridElement::growing(element.initial_coords.len(), coords)
                }
            })
            .collect()
    }

    /// final coordinates of every pool, i.e. the visible part after the transition
    pub fn final_coordinates<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Vec<GridCoordinate>> {
        self.balance(rng)
            .iter()
            .map(|element| element.final_coords().to_vec())
            .collect()
    }
}
