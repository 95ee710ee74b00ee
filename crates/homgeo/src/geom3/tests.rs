use super::*;
use crate::cfg::ORTHO_EPS;
use crate::GeomError;
use nalgebra::{Matrix3, Matrix4, Vector3};
use proptest::prelude::*;
use std::f64::consts::FRAC_PI_2;

fn nonzero_vec() -> impl Strategy<Value = Vector3D> {
    (-10.0..10.0f64, -10.0..10.0f64, -10.0..10.0f64)
        .prop_map(|(x, y, z)| Vector3D::new(x, y, z))
        .prop_filter("norm bounded away from zero", |v| v.norm() > 1e-3)
}

fn point() -> impl Strategy<Value = Point3D> {
    (-100.0..100.0f64, -100.0..100.0f64, -100.0..100.0f64)
        .prop_map(|(x, y, z)| Point3D::new(x, y, z))
}

fn frame() -> impl Strategy<Value = FrameTransform> {
    (point(), nonzero_vec()).prop_map(|(p, d)| FrameTransform::from_pd(p, d).unwrap())
}

fn close(a: &Vector3D, b: &Vector3D, eps: f64) -> bool {
    (*a - *b).norm() <= eps
}

proptest! {
    #[test]
    fn rotfrom_maps_u_onto_v(u in nonzero_vec(), v in nonzero_vec()) {
        let r = v.rotfrom(&u).unwrap();
        prop_assert!(is_rotation(&r, 1e-9));
        let ru = Vector3D::from(r * u.hat().unwrap().coords());
        prop_assert!(close(&ru, &v.hat().unwrap(), 1e-9));
    }

    #[test]
    fn rotfrom_antiparallel(u in nonzero_vec()) {
        let v = -u * 2.5;
        let r = v.rotfrom(&u).unwrap();
        prop_assert!(is_rotation(&r, 1e-9));
        let ru = Vector3D::from(r * u.hat().unwrap().coords());
        prop_assert!(close(&ru, &v.hat().unwrap(), 1e-9));
    }

    #[test]
    fn closure_table(p in point(), q in point(), a in nonzero_vec(), b in nonzero_vec()) {
        let d: Vector3D = p - q;
        prop_assert!(close(&d, &Vector3D::from(p.coords() - q.coords()), 0.0));
        let moved: Point3D = p + a;
        prop_assert_eq!(moved.coords(), p.coords() + a.coords());
        let s: Vector3D = a + b;
        prop_assert_eq!(s.coords(), a.coords() + b.coords());
        let sum = Primitive::from(p).checked_add(Primitive::from(q));
        let is_mismatch = matches!(sum, Err(GeomError::TypeMismatch { .. }));
        prop_assert!(is_mismatch);
    }

    #[test]
    fn inverse_is_two_sided(f in frame()) {
        prop_assert!((f * f.inverse()).approx_eq(&FrameTransform::identity(), 1e-9));
        prop_assert!((f.inverse() * f).approx_eq(&FrameTransform::identity(), 1e-9));
    }

    #[test]
    fn composition_matches_sequential_application(f1 in frame(), f2 in frame(), p in point(), v in nonzero_vec()) {
        let composed = (f2 * f1) * p;
        let sequential = f2 * (f1 * p);
        prop_assert!(composed.distance(&sequential) < 1e-9);
        let composed_v = (f2 * f1) * v;
        prop_assert!(close(&composed_v, &(f2 * (f1 * v)), 1e-9));
        prop_assert!((f2 * f1).is_rigid(1e-9));
    }

    #[test]
    fn transforms_preserve_distances(f in frame(), p in point(), q in point()) {
        prop_assert!(((f * p).distance(&(f * q)) - p.distance(&q)).abs() < 1e-9);
    }
}

#[test]
fn rotfrom_identity_for_equal_directions() {
    let u = Vector3D::new(0.0, 0.0, 3.0);
    let r = u.rotfrom(&Vector3D::new(0.0, 0.0, 1.0)).unwrap();
    assert_eq!(r, Matrix3::identity());
}

#[test]
fn rotfrom_quarter_turn() {
    // e_x -> e_y is +90 degrees about z
    let r = Vector3D::new(0.0, 1.0, 0.0)
        .rotfrom(&Vector3D::new(1.0, 0.0, 0.0))
        .unwrap();
    let expected = Matrix3::new(
        FRAC_PI_2.cos(), -FRAC_PI_2.sin(), 0.0,
        FRAC_PI_2.sin(), FRAC_PI_2.cos(), 0.0,
        0.0, 0.0, 1.0,
    );
    assert!((r - expected).amax() < 1e-12);
}

#[test]
fn rotfrom_half_turn_is_deterministic() {
    let u = Vector3D::new(0.0, 0.0, 1.0);
    let v = Vector3D::new(0.0, 0.0, -1.0);
    let r1 = v.rotfrom(&u).unwrap();
    let r2 = v.rotfrom(&u).unwrap();
    assert_eq!(r1, r2);
    assert!(is_rotation(&r1, 1e-12));
    assert!((r1 * Vector3::z() + Vector3::z()).norm() < 1e-12);
}

#[test]
fn rotfrom_rejects_zero_vectors() {
    let z = Vector3D::zeros();
    assert!(matches!(
        z.rotfrom(&Vector3D::new(1.0, 0.0, 0.0)),
        Err(GeomError::Degenerate { .. })
    ));
    assert!(matches!(
        Vector3D::new(1.0, 0.0, 0.0).rotfrom(&z),
        Err(GeomError::Degenerate { .. })
    ));
}

#[test]
fn hat_of_zero_is_degenerate() {
    assert!(matches!(
        Vector3D::zeros().hat(),
        Err(GeomError::Degenerate { .. })
    ));
    let h = Vector3D::new(3.0, 0.0, 4.0).hat().unwrap();
    assert!((h.norm() - 1.0).abs() < 1e-15);
    assert_eq!(h, Vector3D::new(0.6, 0.0, 0.8));
}

#[test]
fn hat_of_huge_finite_vector() {
    let h = Vector3D::new(1e200, 0.0, 0.0).hat().unwrap();
    assert_eq!(h, Vector3D::new(1.0, 0.0, 0.0));
    let h = Vector3D::new(-3e307, 4e307, 0.0).hat().unwrap();
    assert!((h - Vector3D::new(-0.6, 0.8, 0.0)).norm() < 1e-15);
    let tiny = Vector3D::new(3e-320, 0.0, 4e-320).hat().unwrap();
    assert!((tiny.norm() - 1.0).abs() < 1e-12);
    assert!(Vector3D::new(f64::INFINITY, 0.0, 0.0).hat().is_err());
    assert!(Vector3D::new(f64::NAN, 1.0, 0.0).hat().is_err());
}

#[test]
fn perpendicular_is_orthogonal_unit() {
    for u in [Vector3::x(), Vector3::y(), Vector3::z(), Vector3::new(1.0, 2.0, -3.0)] {
        let p = perpendicular(&u);
        assert!(p.dot(&u).abs() < 1e-12);
        assert!((p.norm() - 1.0).abs() < 1e-12);
    }
}

#[test]
fn primitive_dynamic_arithmetic() {
    let p = Primitive::from(Point3D::new(1.0, 1.0, 1.0));
    let q = Primitive::from(Point3D::new(0.0, 1.0, 2.0));
    let v = Primitive::from(Vector3D::new(1.0, 0.0, 0.0));
    assert_eq!(
        p.checked_sub(q).unwrap(),
        Primitive::Vector(Vector3D::new(1.0, 0.0, -1.0))
    );
    assert_eq!(
        p.checked_add(v).unwrap(),
        Primitive::Point(Point3D::new(2.0, 1.0, 1.0))
    );
    assert!(v.checked_add(v).unwrap() == Primitive::Vector(Vector3D::new(2.0, 0.0, 0.0)));
    match v.checked_add(p) {
        Err(GeomError::TypeMismatch { op, lhs, rhs }) => {
            assert_eq!((op, lhs, rhs), ("+", "Vector3D", "Point3D"));
        }
        other => panic!("expected mismatch, got {other:?}"),
    }
    assert!(v.checked_sub(p).is_err());
    assert!(p.checked_scale(2.0).is_err());
    assert_eq!(
        v.checked_scale(-2.0).unwrap(),
        Primitive::Vector(Vector3D::new(-2.0, 0.0, 0.0))
    );
}

#[test]
fn primitive_homogeneous_kinds() {
    let p = Primitive::from(Point3D::new(1.0, 2.0, 3.0));
    assert_eq!(p.to_homogeneous().w, 1.0);
    let v = Primitive::from(Vector3D::new(1.0, 2.0, 3.0));
    assert_eq!(v.to_homogeneous().w, 0.0);
    assert_eq!(Primitive::from_homogeneous(&p.to_homogeneous(), true).unwrap(), p);
    assert!(Primitive::from_homogeneous(&p.to_homogeneous(), false).is_err());
}

#[test]
fn frame_applies_affinely_to_points_and_linearly_to_vectors() {
    let t = FrameTransform::from_translation(Vector3D::new(1.0, 2.0, 3.0));
    assert_eq!(t * Point3D::origin(), Point3D::new(1.0, 2.0, 3.0));
    assert_eq!(t * Vector3D::new(1.0, 0.0, 0.0), Vector3D::new(1.0, 0.0, 0.0));
    assert_eq!(
        t * Primitive::from(Vector3D::new(0.0, 1.0, 0.0)),
        Primitive::Vector(Vector3D::new(0.0, 1.0, 0.0))
    );
    assert!((t * Primitive::from(Point3D::origin())).is_point());
}

#[test]
fn from_rt_rejects_non_rotations() {
    let scale = Matrix3::identity() * 2.0;
    assert!(matches!(
        FrameTransform::from_rt(scale, Vector3::zeros()),
        Err(GeomError::InvalidRotation { .. })
    ));
    let reflection = Matrix3::from_diagonal(&Vector3::new(1.0, 1.0, -1.0));
    match FrameTransform::from_rt(reflection, Vector3::zeros()) {
        Err(GeomError::InvalidRotation { det, .. }) => assert!((det + 1.0).abs() < 1e-12),
        other => panic!("expected invalid rotation, got {other:?}"),
    }
    let rz = Vector3D::new(0.0, 1.0, 0.0)
        .rotfrom(&Vector3D::new(1.0, 0.0, 0.0))
        .unwrap();
    let f = FrameTransform::from_rt(rz, Vector3::new(1.0, 0.0, 0.0)).unwrap();
    assert_eq!(f.rotation(), rz);
    assert_eq!(f.translation(), Vector3::new(1.0, 0.0, 0.0));
}

#[test]
fn from_pd_end_to_end() {
    let a: Point3D = "1 2 3".parse().unwrap();
    let b = Point3D::new(4.0, 5.0, 6.0);
    let f = FrameTransform::from_pd(a, b - a).unwrap();
    // origin of the frame is a, forward axis points at b
    assert!((f * Point3D::origin()).distance(&a) < 1e-12);
    let forward = f * Vector3D::new(0.0, 0.0, 1.0);
    assert!((forward - (b - a).hat().unwrap()).norm() < 1e-12);
    assert!(f.is_rigid(1e-12));

    let m: Matrix4<f64> = f.into();
    assert_eq!(m.row(3).iter().copied().collect::<Vec<_>>(), vec![0.0, 0.0, 0.0, 1.0]);
    assert_eq!(f.to_array()[3], [0.0, 0.0, 0.0, 1.0]);

    // frame B shares A's rotation, anchored at b
    let g = FrameTransform::from_rt(f.rotation(), b.coords()).unwrap();
    assert!((g * Point3D::origin()).distance(&b) < 1e-12);
    assert!((g * f.inverse() * a).distance(&b) < 1e-12);
}

#[test]
fn from_pd_rejects_zero_direction() {
    let a = Point3D::new(1.0, 2.0, 3.0);
    assert!(FrameTransform::from_pd(a, a - a).is_err());
}

#[test]
fn renormalized_repairs_drift() {
    let f = FrameTransform::from_pd(Point3D::new(0.5, 0.0, 0.0), Vector3D::new(1.0, 1.0, 0.2))
        .unwrap();
    let mut m = f.to_matrix();
    m[(0, 1)] += 1e-4;
    m[(2, 0)] -= 1e-4;
    let drifted = FrameTransform::try_from(m);
    // 1e-4 is beyond ORTHO_EPS, so the raw matrix is refused
    assert!(drifted.is_err());
    let mut g = f;
    for _ in 0..1000 {
        g = g * FrameTransform::from_pd(Point3D::origin(), Vector3D::new(0.3, -0.2, 1.0)).unwrap();
    }
    let r = g.renormalized();
    assert!(r.is_rigid(ORTHO_EPS));
    assert!((r.rotation() - g.rotation()).amax() < 1e-6);
}

#[test]
fn serde_round_trip_of_frame_and_primitives() {
    let f = FrameTransform::from_pd(Point3D::new(1.0, 2.0, 3.0), Vector3D::new(0.0, 1.0, 1.0))
        .unwrap();
    let json = serde_json::to_string(&f).unwrap();
    let back: FrameTransform = serde_json::from_str(&json).unwrap();
    assert!(back.approx_eq(&f, 1e-12));
    let bad = "[[2,0,0,0],[0,1,0,0],[0,0,1,0],[0,0,0,1]]";
    assert!(serde_json::from_str::<FrameTransform>(bad).is_err());

    let p = Point3D::new(1.0, 2.0, 3.0);
    assert_eq!(serde_json::to_string(&p).unwrap(), "[1.0,2.0,3.0]");
    let v: Vector3D = serde_json::from_str("[0.0,0.5,1.0]").unwrap();
    assert_eq!(v, Vector3D::new(0.0, 0.5, 1.0));
    let prim = serde_json::to_value(Primitive::from(p)).unwrap();
    assert_eq!(prim, serde_json::json!({"point": [1.0, 2.0, 3.0]}));
}

#[test]
fn coercion_factories() {
    assert_eq!(
        Point3D::try_from(&[1.0, 2.0, 3.0][..]).unwrap(),
        Point3D::new(1.0, 2.0, 3.0)
    );
    assert!(Vector3D::try_from(&[1.0, 2.0][..]).is_err());
    assert!(matches!(
        "1 2".parse::<Vector3D>(),
        Err(GeomError::Shape { .. })
    ));
    assert_eq!(
        "0 0 -1".parse::<Vector3D>().unwrap().rotfrom(&Vector3D::new(0.0, 0.0, 1.0)).unwrap()
            * Vector3::z(),
        -Vector3::z()
    );
}
