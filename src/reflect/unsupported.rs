//! Kinds the engine classifies as invalid.

use std::sync::mpsc::{Receiver, Sender};

use super::{Kind, Reflect, Shape};

impl Reflect for () {
    fn shape(&self) -> Shape<'_> {
        Shape::Nil
    }
}

impl<R> Reflect for fn() -> R {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Kind::Fn)
    }
}

impl<A, R> Reflect for fn(A) -> R {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Kind::Fn)
    }
}

impl<T> Reflect for *const T {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Kind::RawPointer)
    }
}

impl<T> Reflect for *mut T {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Kind::RawPointer)
    }
}

impl<T> Reflect for Sender<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Kind::Channel)
    }
}

impl<T> Reflect for Receiver<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Kind::Channel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_kinds() {
        let f: fn() -> i32 = || 1;
        assert_eq!(f.shape().kind(), Kind::Fn);
        let p: *const u8 = std::ptr::null();
        assert_eq!(p.shape().kind(), Kind::RawPointer);
        let (tx, rx) = std::sync::mpsc::channel::<u8>();
        assert_eq!(tx.shape().kind(), Kind::Channel);
        assert_eq!(rx.shape().kind(), Kind::Channel);
        assert_eq!(().shape().kind(), Kind::Nil);
    }
}
