use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use rolegate_auth::{AccessControlService, Role, User};
use rolegate_core::UserId;
use rolegate_infra::{InMemoryRoleCatalog, InMemoryUserDirectory};

fn build_service(
    users: usize,
) -> AccessControlService<InMemoryRoleCatalog, InMemoryUserDirectory> {
    let admin = Role::named("Admin", ["ModifyRoles", "ViewReports"]).unwrap();
    let staff = Role::named("Staff", ["ParkingAccess"]).unwrap();
    let catalog = InMemoryRoleCatalog::with_roles([admin.clone(), staff.clone()]).unwrap();

    let directory = InMemoryUserDirectory::new();
    let population = (0..users).map(|i| {
        let role = if i % 10 == 0 { admin.clone() } else { staff.clone() };
        User::new(UserId::new(format!("user{i}")).unwrap(), format!("User {i}")).with_role(role.name().clone())
    });
    for user in population {
        rolegate_auth::UserDirectory::add_user(&directory, user).unwrap();
    }

    AccessControlService::new(catalog, directory)
}

fn bench_has_access(c: &mut Criterion) {
    let svc = build_service(1_000);
    let mut group = c.benchmark_group("has_access");

    group.bench_function("granted", |b| {
        b.iter(|| svc.has_access(black_box("user1"), black_box("ParkingAccess")).unwrap())
    });
    group.bench_function("denied", |b| {
        b.iter(|| svc.has_access(black_box("user1"), black_box("ModifyRoles")).unwrap())
    });

    group.finish();
}

fn bench_update_user_role(c: &mut Criterion) {
    let mut group = c.benchmark_group("update_user_role");
    let admin = Role::named("Admin", ["ModifyRoles", "ViewReports"]).unwrap();
    let staff = Role::named("Staff", ["ParkingAccess"]).unwrap();

    // The admin-count scan is linear in directory size.
    for users in [10usize, 100, 1_000] {
        let svc = build_service(users);
        group.bench_with_input(BenchmarkId::from_parameter(users), &users, |b, _| {
            let mut flip = false;
            b.iter(|| {
                flip = !flip;
                let role = if flip { &admin } else { &staff };
                svc.update_user_role("user0", "user1", role).unwrap()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_has_access, bench_update_user_role);
criterion_main!(benches);
