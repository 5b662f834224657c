#![feature(test)]

extern crate test;
extern crate settled_promise;
extern crate threadpool;

use test::Bencher;
use threadpool::ThreadPool;
use settled_promise::Promise;

#[bench]
fn local_resolved(b: &mut Bencher) {
    b.iter(|| {
        let p = Promise::resolved(123);
        assert_eq!(p.wait().ok(), Some(123));
    })
}

#[bench]
fn local_rejected(b: &mut Bencher) {
    b.iter(|| {
        let p = Promise::<u32>::rejected("nope");
        assert!(p.wait().is_err());
    })
}

#[bench]
fn local_finally(b: &mut Bencher) {
    b.iter(|| {
        let p = Promise::resolved(123);
        assert_eq!(p.finally(|| ()).ok(), Some(123));
    })
}

#[bench]
fn thr_new(b: &mut Bencher) {
    b.iter(|| {
        let p = Promise::new(|resolve, _| resolve.resolve(123));
        assert_eq!(p.wait().ok(), Some(123));
    })
}

#[bench]
fn thr_then(b: &mut Bencher) {
    b.iter(|| {
        let p = Promise::resolved(123).then(|v| v);
        assert_eq!(p.wait().ok(), Some(123));
    })
}

#[bench]
fn thr_flatten(b: &mut Bencher) {
    b.iter(|| {
        let p = Promise::resolved_with(Promise::resolved(123));
        assert_eq!(p.wait().ok(), Some(123));
    })
}

#[bench]
fn thrpool_new(b: &mut Bencher) {
    let pool = ThreadPool::new(2);

    b.iter(|| {
        let p = Promise::new_with(|resolve, _| resolve.resolve(123), pool.clone());
        assert_eq!(p.wait().ok(), Some(123));
    })
}

#[bench]
fn thrpool_then(b: &mut Bencher) {
    let pool = ThreadPool::new(2);

    b.iter(|| {
        let p = Promise::new_with(|resolve, _| resolve.resolve(123), pool.clone());
        let p = p.then(|v| v);
        assert_eq!(p.wait().ok(), Some(123));
    })
}
