mod shared;
use self::shared::util::{labeled_matrix, random_matrix};

use ::colmat::{join, JoinKind, Matrix};

#[test]
fn augment_shape_and_placement() {
    let a = random_matrix((3, 2), 1);
    let b = random_matrix((5, 4), 2);
    let out = join(JoinKind::Augment, &[a.clone(), b.clone()]);

    assert_eq!(out.dims(), (5, 6));
    assert_eq!(out.sub_matrix_sized(0, 0, (3, 2)), a);
    assert_eq!(out.sub_matrix_sized(0, 2, (5, 4)), b);
    assert!(out.sub_matrix_sized(3, 0, (2, 2)).iter().all(|x| x == 0.0));
}

#[test]
fn stack_shape_and_placement() {
    let a = random_matrix((3, 2), 1);
    let b = random_matrix((5, 4), 2);
    let out = join(JoinKind::Stack, &[a.clone(), b.clone()]);

    assert_eq!(out.dims(), (8, 4));
    assert_eq!(out.sub_matrix_sized(0, 0, (3, 2)), a);
    assert_eq!(out.sub_matrix_sized(3, 0, (5, 4)), b);
    assert!(out.sub_matrix_sized(0, 2, (3, 2)).iter().all(|x| x == 0.0));
}

#[test]
fn join_rows_of_a_matrix() {
    // stacking every row of a matrix rebuilds it
    let m = labeled_matrix((4, 3));
    let rows: Vec<_> = (0..4).map(|i| m.row(i)).collect();
    assert_eq!(join(JoinKind::Stack, &rows[..]), m);

    // and augmenting them lays them out end to end
    let flat = join(JoinKind::Augment, &rows[..]);
    assert_eq!(flat.dims(), (1, 12));
    assert_eq!(flat.get(0, 3), 100.0);
}

#[test]
fn join_nothing() {
    let empty: [Matrix; 0] = [];
    assert!(join(JoinKind::Augment, &empty).is_empty());
    assert!(join(JoinKind::Stack, &[Matrix::zeros((0, 0))]).is_empty());
}
