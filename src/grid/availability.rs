//! Classroom availability grid.
//!
//! One [`Slot`] exists for every (day, classroom, slot index) triple.
//! Slots are laid out in a flat vector indexed by that composite key, so
//! lookups are O(1) without building string keys.
//!
//! The grid knows nothing about instructors: unavailability is
//! per-instructor while the grid is per-classroom, so constraints are
//! evaluated by the placer instead of being baked in here.

use std::collections::HashMap;

use crate::models::{Classroom, ClassroomId, Day, SectionId, TimeSlotCatalog};

/// One grid cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub day: Day,
    pub classroom_id: ClassroomId,
    /// Position in the time-slot catalog.
    pub slot_index: usize,
    pub is_available: bool,
    pub assigned_section: Option<SectionId>,
}

/// Per-run occupancy of every classroom slot in the week.
#[derive(Debug, Clone)]
pub struct AvailabilityGrid {
    catalog: TimeSlotCatalog,
    classroom_index: HashMap<ClassroomId, usize>,
    classroom_count: usize,
    slots: Vec<Slot>,
}

impl AvailabilityGrid {
    /// Creates a grid with every slot available.
    ///
    /// Duplicate classroom ids share the cells of their first occurrence.
    pub fn new(catalog: &TimeSlotCatalog, classrooms: &[Classroom]) -> Self {
        let mut classroom_index = HashMap::with_capacity(classrooms.len());
        let mut ordered = Vec::with_capacity(classrooms.len());
        for room in classrooms {
            if !classroom_index.contains_key(&room.id) {
                classroom_index.insert(room.id, ordered.len());
                ordered.push(room.id);
            }
        }

        let mut slots = Vec::with_capacity(Day::COUNT * ordered.len() * catalog.len());
        for day in Day::ALL {
            for &classroom_id in &ordered {
                for slot_index in 0..catalog.len() {
                    slots.push(Slot {
                        day,
                        classroom_id,
                        slot_index,
                        is_available: true,
                        assigned_section: None,
                    });
                }
            }
        }

        Self {
            catalog: catalog.clone(),
            classroom_index,
            classroom_count: ordered.len(),
            slots,
        }
    }

    /// The catalog this grid was built for.
    pub fn catalog(&self) -> &TimeSlotCatalog {
        &self.catalog
    }

    /// Whether the classroom is part of the grid.
    pub fn has_classroom(&self, classroom_id: ClassroomId) -> bool {
        self.classroom_index.contains_key(&classroom_id)
    }

    #[inline]
    fn offset(&self, day: Day, classroom_id: ClassroomId, slot_index: usize) -> Option<usize> {
        if slot_index >= self.catalog.len() {
            return None;
        }
        let room = *self.classroom_index.get(&classroom_id)?;
        Some((day.index() * self.classroom_count + room) * self.catalog.len() + slot_index)
    }

    /// Cell for a slot label.
    pub fn get(&self, day: Day, classroom_id: ClassroomId, time_slot: &str) -> Option<&Slot> {
        let index = self.catalog.index_of(time_slot)?;
        self.slot(day, classroom_id, index)
    }

    /// Cell for a slot index.
    pub fn slot(&self, day: Day, classroom_id: ClassroomId, slot_index: usize) -> Option<&Slot> {
        self.offset(day, classroom_id, slot_index)
            .map(|offset| &self.slots[offset])
    }

    /// Updates a cell by label. Returns `false` if the cell does not exist.
    pub fn set(
        &mut self,
        day: Day,
        classroom_id: ClassroomId,
        time_slot: &str,
        occupied: bool,
        section_id: Option<SectionId>,
    ) -> bool {
        let Some(index) = self.catalog.index_of(time_slot) else {
            return false;
        };
        let Some(offset) = self.offset(day, classroom_id, index) else {
            return false;
        };
        let slot = &mut self.slots[offset];
        slot.is_available = !occupied;
        slot.assigned_section = section_id;
        true
    }

    /// Whether a cell exists and is free. Unknown classrooms are never free.
    #[inline]
    pub fn is_free(&self, day: Day, classroom_id: ClassroomId, slot_index: usize) -> bool {
        self.slot(day, classroom_id, slot_index)
            .is_some_and(|s| s.is_available)
    }

    /// Marks `len` consecutive cells starting at `start` as taken by a section.
    ///
    /// Cells past the end of the catalog are ignored.
    pub fn occupy(
        &mut self,
        day: Day,
        classroom_id: ClassroomId,
        start: usize,
        len: usize,
        section_id: SectionId,
    ) {
        for slot_index in start..start + len {
            if let Some(offset) = self.offset(day, classroom_id, slot_index) {
                let slot = &mut self.slots[offset];
                slot.is_available = false;
                slot.assigned_section = Some(section_id);
            }
        }
    }

    /// Number of occupied cells for a classroom across the week.
    pub fn occupied_count(&self, classroom_id: ClassroomId) -> usize {
        self.slots
            .iter()
            .filter(|s| s.classroom_id == classroom_id && !s.is_available)
            .count()
    }
}
