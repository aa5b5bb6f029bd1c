//! Benchmark test for scope resolution performance.

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use finboard_shared::types::UserId;

    use crate::access::hierarchy::UserHierarchy;
    use crate::access::resolver::AccessScopeResolver;
    use crate::access::types::{Actor, Role, UserRecord};

    fn make_user(id: i64, role: Role, manager: Option<i64>) -> UserRecord {
        UserRecord {
            id: UserId::from_raw(id),
            full_name: format!("User {id}"),
            email: format!("user{id}@example.com"),
            username: format!("user{id}"),
            phone: None,
            role: Some(role),
            raw_role: role.as_str().to_string(),
            is_active: true,
            department: None,
            manager_id: manager.map(UserId::from_raw),
        }
    }

    /// Generate a realistic org: one finance manager at the top, a layer
    /// of managers under them, and employees under each manager.
    fn generate_org(num_managers: i64, employees_per_manager: i64) -> Vec<UserRecord> {
        let mut users = vec![make_user(1, Role::FinanceManager, None)];
        let mut next_id = 2;

        for _ in 0..num_managers {
            let manager_id = next_id;
            users.push(make_user(manager_id, Role::Manager, Some(1)));
            next_id += 1;

            for _ in 0..employees_per_manager {
                users.push(make_user(next_id, Role::Employee, Some(manager_id)));
                next_id += 1;
            }
        }

        users
    }

    #[test]
    fn benchmark_resolve_5000_users() {
        // 100 managers with 50 employees each, plus the top actor
        let users = generate_org(100, 50);
        let actor = Actor::from_parts(UserId::from_raw(1), "finance_manager", None);

        let start = Instant::now();
        let scope = AccessScopeResolver::resolve(&actor, &users);
        let duration = start.elapsed();

        println!("\n=== BENCHMARK: resolve over {} users ===", users.len());
        println!("Duration: {duration:?}");
        println!("Visible ids: {}", scope.len());

        // Actor plus every employee; the manager layer stays out.
        assert_eq!(scope.len(), 1 + 100 * 50);
        assert!(
            duration.as_millis() < 2000,
            "Resolution took {}ms, expected <2000ms",
            duration.as_millis()
        );
    }

    #[test]
    fn benchmark_hierarchy_build_and_walk_10000_users() {
        let users = generate_org(200, 50);

        let start = Instant::now();
        let hierarchy = UserHierarchy::build(&users);
        let walked = hierarchy.walk().count();
        let duration = start.elapsed();

        println!("\n=== BENCHMARK: build + walk over {} users ===", users.len());
        println!("Duration: {duration:?}");
        println!("Walked: {walked}");

        assert_eq!(walked, users.len());
        assert!(
            duration.as_millis() < 2000,
            "Build and walk took {}ms, expected <2000ms",
            duration.as_millis()
        );
    }
}
