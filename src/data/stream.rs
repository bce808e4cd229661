use super::{EdgeSource, EdgeStream, VertexSource, VertexStream};
use crate::{
    error::Result,
    types::{VId, VLabel},
};

/// A cursor over rows kept in memory.
pub struct RowCursor<R> {
    rows: R,
    pos: usize,
}

impl<R> RowCursor<R> {
    pub fn new(rows: R) -> Self {
        Self { rows, pos: 0 }
    }
}

impl<R: AsRef<[(VId, VLabel)]>> VertexStream for RowCursor<R> {
    fn size(&self) -> usize {
        self.rows.as_ref().len()
    }

    fn valid(&self) -> bool {
        self.pos < self.rows.as_ref().len()
    }

    fn next(&mut self) {
        self.pos += 1;
    }

    fn get_id(&self) -> VId {
        self.rows.as_ref()[self.pos].0
    }

    fn get_label(&self) -> VLabel {
        self.rows.as_ref()[self.pos].1
    }
}

impl<R: AsRef<[(VId, VId)]>> EdgeStream for RowCursor<R> {
    fn valid(&self) -> bool {
        self.pos < self.rows.as_ref().len()
    }

    fn next(&mut self) {
        self.pos += 1;
    }

    fn get_source(&self) -> VId {
        self.rows.as_ref()[self.pos].0
    }

    fn get_destination(&self) -> VId {
        self.rows.as_ref()[self.pos].1
    }
}

impl VertexSource for [(VId, VLabel)] {
    fn vertices(&self) -> Result<Box<dyn VertexStream + '_>> {
        Ok(Box::new(RowCursor::new(self)))
    }
}

impl VertexSource for Vec<(VId, VLabel)> {
    fn vertices(&self) -> Result<Box<dyn VertexStream + '_>> {
        self.as_slice().vertices()
    }
}

impl EdgeSource for [(VId, VId)] {
    fn edges(&self) -> Result<Box<dyn EdgeStream + '_>> {
        Ok(Box::new(RowCursor::new(self)))
    }
}

impl EdgeSource for Vec<(VId, VId)> {
    fn edges(&self) -> Result<Box<dyn EdgeStream + '_>> {
        self.as_slice().edges()
    }
}

/// Yields every arc of the wrapped source in both directions.
pub struct Undirected<'a, E: ?Sized> {
    edges: &'a E,
}

impl<'a, E: EdgeSource + ?Sized> Undirected<'a, E> {
    pub fn new(edges: &'a E) -> Self {
        Self { edges }
    }
}

impl<'a, E: EdgeSource + ?Sized> EdgeSource for Undirected<'a, E> {
    fn edges(&self) -> Result<Box<dyn EdgeStream + '_>> {
        Ok(Box::new(UndirectedStream {
            inner: self.edges.edges()?,
            reversed: false,
        }))
    }
}

struct UndirectedStream<'a> {
    inner: Box<dyn EdgeStream + 'a>,
    reversed: bool,
}

impl<'a> EdgeStream for UndirectedStream<'a> {
    fn valid(&self) -> bool {
        self.inner.valid()
    }

    fn next(&mut self) {
        if self.reversed {
            self.inner.next();
        }
        self.reversed = !self.reversed;
    }

    fn get_source(&self) -> VId {
        if self.reversed {
            self.inner.get_destination()
        } else {
            self.inner.get_source()
        }
    }

    fn get_destination(&self) -> VId {
        if self.reversed {
            self.inner.get_source()
        } else {
            self.inner.get_destination()
        }
    }
}
