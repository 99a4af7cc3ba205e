use secdash::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

/// One recorded renderer operation.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartOp {
    Created {
        id: u32,
        kind: ChartKind,
        legend: bool,
        data: ChartData,
    },
    Updated {
        id: u32,
        data: ChartData,
    },
    Destroyed {
        id: u32,
    },
}

/// Mock ChartRenderer for testing
///
/// Hands out numbered handles and records every operation; tests share
/// the op log through the `ops` handle.
#[derive(Default)]
pub struct MockChartRenderer {
    next_id: u32,
    pub ops: Rc<RefCell<Vec<ChartOp>>>,
}

impl MockChartRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops_handle(&self) -> Rc<RefCell<Vec<ChartOp>>> {
        self.ops.clone()
    }
}

impl ChartRenderer for MockChartRenderer {
    type Handle = u32;

    fn create(&mut self, spec: &ChartSpec, data: &ChartData) -> u32 {
        self.next_id += 1;
        self.ops.borrow_mut().push(ChartOp::Created {
            id: self.next_id,
            kind: spec.kind,
            legend: spec.legend,
            data: data.clone(),
        });
        self.next_id
    }

    fn update(&mut self, handle: &mut u32, data: &ChartData) {
        self.ops.borrow_mut().push(ChartOp::Updated {
            id: *handle,
            data: data.clone(),
        });
    }

    fn destroy(&mut self, handle: u32) {
        self.ops.borrow_mut().push(ChartOp::Destroyed { id: handle });
    }
}
