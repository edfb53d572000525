//! Ammo trucks
//!
//! Trucks drive along the ground from a city to a launcher and back. Each
//! load takes one unit from the city's stockpile. A truck that gets home
//! with more work waiting turns straight around instead of parking.

use super::state::{AmmoTruck, GameState, TruckStatus};
use crate::error::DispatchError;

/// Missiles carried per stockpile unit
pub const AMMO_PER_LOAD: u32 = 3;
/// Travel time per unit of horizontal distance (ms)
pub const MS_PER_UNIT: f32 = 3.0;
/// Fixed loading overhead per leg (ms)
pub const LEG_OVERHEAD_MS: f32 = 1000.0;

/// Time for one leg over `distance` units of ground
pub fn delivery_time_ms(distance: f32) -> f32 {
    distance * MS_PER_UNIT + LEG_OVERHEAD_MS
}

/// Trucks from this city currently on the road
pub fn busy_trucks(state: &GameState, city: usize) -> u32 {
    state
        .trucks
        .iter()
        .filter(|t| t.city == city && t.status != TruckStatus::Idle)
        .count() as u32
}

pub fn available_slots(state: &GameState, city: usize) -> u32 {
    state
        .economy
        .max_trucks()
        .saturating_sub(busy_trucks(state, city))
}

/// Missiles already on their way to a launcher
fn inbound_ammo(state: &GameState, launcher: usize) -> u32 {
    state
        .trucks
        .iter()
        .filter(|t| t.launcher == launcher && t.status == TruckStatus::Delivering)
        .map(|t| t.ammo)
        .sum()
}

/// Live launcher below capacity with the least ammo (lowest index on ties)
pub fn neediest_launcher(state: &GameState) -> Option<usize> {
    (0..state.launchers.len())
        .filter(|&i| state.is_launcher_alive(i) && state.launchers[i].needs_ammo())
        .min_by_key(|&i| state.launchers[i].missiles)
}

/// Like `neediest_launcher` but skips launchers whose gap is already covered
fn unserved_launcher(state: &GameState) -> Option<usize> {
    (0..state.launchers.len())
        .filter(|&i| {
            let l = &state.launchers[i];
            state.is_launcher_alive(i) && l.missiles + inbound_ammo(state, i) < l.max_missiles
        })
        .min_by_key(|&i| state.launchers[i].missiles)
}

/// Send a truck from `city`. With no launcher given, the neediest one is
/// chosen. Takes one unit from the city's stockpile.
pub fn dispatch_truck(
    state: &mut GameState,
    city: usize,
    launcher: Option<usize>,
) -> Result<u32, DispatchError> {
    if city >= state.cities.len() {
        return Err(DispatchError::InvalidCity(city));
    }
    if !state.is_city_alive(city) {
        return Err(DispatchError::CityDestroyed(city));
    }
    if available_slots(state, city) == 0 {
        return Err(DispatchError::NoTruckAvailable(city));
    }
    if state.cities[city].ammo_stockpile == 0 {
        return Err(DispatchError::EmptyStockpile(city));
    }
    let launcher = match launcher {
        Some(i) if i >= state.launchers.len() => return Err(DispatchError::InvalidLauncher(i)),
        Some(i) if state.is_launcher_alive(i) && state.launchers[i].needs_ammo() => i,
        Some(_) => return Err(DispatchError::NoTurretNeedsAmmo),
        None => neediest_launcher(state).ok_or(DispatchError::NoTurretNeedsAmmo)?,
    };

    state.cities[city].ammo_stockpile -= 1;
    let from_x = state.cities[city].pos.x;
    let to_x = state.launchers[launcher].pos.x;
    let id = state.next_entity_id();
    state.trucks.push(AmmoTruck {
        id,
        city,
        launcher,
        from_x,
        to_x,
        ammo: AMMO_PER_LOAD,
        status: TruckStatus::Delivering,
        elapsed_ms: 0.0,
        leg_ms: delivery_time_ms((to_x - from_x).abs()),
    });
    log::debug!("Truck {} from city {} to launcher {}", id, city, launcher);
    Ok(id)
}

/// Send trucks from every stocked city while there is uncovered demand
pub fn auto_dispatch(state: &mut GameState) {
    for city in 0..state.cities.len() {
        while state.is_city_alive(city)
            && state.cities[city].ammo_stockpile > 0
            && available_slots(state, city) > 0
        {
            let Some(launcher) = unserved_launcher(state) else {
                return;
            };
            if dispatch_truck(state, city, Some(launcher)).is_err() {
                break;
            }
        }
    }
}

/// Advance every truck by `dt_ms`
pub fn update(state: &mut GameState, dt_ms: f32) {
    for index in 0..state.trucks.len() {
        state.trucks[index].elapsed_ms += dt_ms;
        let truck = &state.trucks[index];
        if truck.elapsed_ms < truck.leg_ms {
            continue;
        }
        let status = truck.status;
        match status {
            TruckStatus::Delivering => deliver(state, index),
            TruckStatus::Returning => arrive_home(state, index),
            TruckStatus::Idle => {}
        }
    }
    state.trucks.retain(|t| t.status != TruckStatus::Idle);
}

fn deliver(state: &mut GameState, index: usize) {
    let (launcher, ammo) = {
        let truck = &state.trucks[index];
        (truck.launcher, truck.ammo)
    };
    // A destroyed launcher's load is lost
    if state.is_launcher_alive(launcher) {
        let accepted = state.launchers[launcher].add_ammo(ammo);
        if accepted > 0 {
            state.emit_ammo_changed(launcher);
        }
    }

    let truck = &mut state.trucks[index];
    truck.ammo = 0;
    truck.status = TruckStatus::Returning;
    truck.elapsed_ms = 0.0;
}

fn arrive_home(state: &mut GameState, index: usize) {
    let city = state.trucks[index].city;
    let next = if state.is_city_alive(city) && state.cities[city].ammo_stockpile > 0 {
        neediest_launcher(state)
    } else {
        None
    };

    match next {
        Some(launcher) => {
            state.cities[city].ammo_stockpile -= 1;
            let to_x = state.launchers[launcher].pos.x;
            let truck = &mut state.trucks[index];
            truck.launcher = launcher;
            truck.to_x = to_x;
            truck.leg_ms = delivery_time_ms((to_x - truck.from_x).abs());
            truck.ammo = AMMO_PER_LOAD;
            truck.status = TruckStatus::Delivering;
            truck.elapsed_ms = 0.0;
        }
        None => state.trucks[index].status = TruckStatus::Idle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FRAME_MS;
    use crate::sim::economy::GlobalUpgrade;
    use crate::sim::state::GameMode;

    fn command_state() -> GameState {
        let mut state = GameState::new(GameMode::Command, 9);
        state.cities[0].ammo_stockpile = 2;
        state
    }

    #[test]
    fn test_delivery_time_formula() {
        assert_eq!(delivery_time_ms(0.0), 1000.0);
        assert_eq!(delivery_time_ms(200.0), 1600.0);
    }

    #[test]
    fn test_truck_delivers_after_leg_time() {
        // 200 units of ground: 200 * 3 + 1000 ms each way
        let mut state = command_state();
        state.cities[0].pos.x = 300.0;
        state.launchers[0].missiles = 2;
        dispatch_truck(&mut state, 0, Some(0)).unwrap();
        assert_eq!(state.trucks[0].leg_ms, 1600.0);
        assert_eq!(state.cities[0].ammo_stockpile, 1);

        update(&mut state, 1599.0);
        assert_eq!(state.trucks[0].status, TruckStatus::Delivering);
        assert_eq!(state.launchers[0].missiles, 2);

        update(&mut state, 1.0);
        assert_eq!(state.trucks[0].status, TruckStatus::Returning);
        assert_eq!(state.launchers[0].missiles, 2 + AMMO_PER_LOAD);
        assert_eq!(state.trucks[0].elapsed_ms, 0.0);
    }

    #[test]
    fn test_excess_ammo_is_discarded() {
        let mut state = command_state();
        state.launchers[1].missiles = 9;
        dispatch_truck(&mut state, 0, Some(1)).unwrap();
        let leg = state.trucks[0].leg_ms;
        update(&mut state, leg);
        assert_eq!(state.launchers[1].missiles, 10);
        assert_eq!(state.trucks[0].ammo, 0);
    }

    #[test]
    fn test_delivery_to_destroyed_launcher_is_lost() {
        let mut state = command_state();
        state.launchers[2].missiles = 0;
        dispatch_truck(&mut state, 0, Some(2)).unwrap();
        state.destroy_launcher(2);
        let leg = state.trucks[0].leg_ms;
        update(&mut state, leg);
        assert_eq!(state.launchers[2].missiles, 0);
        assert_eq!(state.trucks[0].status, TruckStatus::Returning);
    }

    #[test]
    fn test_return_redispatches_without_idling() {
        let mut state = command_state();
        state.launchers[0].missiles = 0;
        state.launchers[1].missiles = 1;
        dispatch_truck(&mut state, 0, Some(1)).unwrap();
        let id = state.trucks[0].id;
        let leg = state.trucks[0].leg_ms;
        update(&mut state, leg);
        let leg = state.trucks[0].leg_ms;
        update(&mut state, leg);

        // Same truck, now heading for the emptiest launcher
        assert_eq!(state.trucks.len(), 1);
        let truck = &state.trucks[0];
        assert_eq!(truck.id, id);
        assert_eq!(truck.status, TruckStatus::Delivering);
        assert_eq!(truck.launcher, 0);
        assert_eq!(state.cities[0].ammo_stockpile, 0);
    }

    #[test]
    fn test_return_with_empty_stockpile_parks() {
        let mut state = command_state();
        state.cities[0].ammo_stockpile = 1;
        state.launchers[0].missiles = 0;
        dispatch_truck(&mut state, 0, None).unwrap();
        let leg = state.trucks[0].leg_ms;
        update(&mut state, leg);
        update(&mut state, leg);
        assert!(state.trucks.is_empty());
        assert_eq!(available_slots(&state, 0), 1);
    }

    #[test]
    fn test_dispatch_failures() {
        let mut state = command_state();
        assert_eq!(
            dispatch_truck(&mut state, 0, None),
            Err(DispatchError::NoTurretNeedsAmmo)
        );
        assert_eq!(dispatch_truck(&mut state, 17, None), Err(DispatchError::InvalidCity(17)));
        assert_eq!(
            dispatch_truck(&mut state, 1, None),
            Err(DispatchError::EmptyStockpile(1))
        );
        state.launchers[0].missiles = 3;
        assert_eq!(
            dispatch_truck(&mut state, 0, Some(5)),
            Err(DispatchError::InvalidLauncher(5))
        );
        // Failures leave the stockpile alone
        assert_eq!(state.cities[0].ammo_stockpile, 2);

        dispatch_truck(&mut state, 0, None).unwrap();
        assert_eq!(
            dispatch_truck(&mut state, 0, None),
            Err(DispatchError::NoTruckAvailable(0))
        );
        state.destroy_city(0);
        assert_eq!(dispatch_truck(&mut state, 0, None), Err(DispatchError::CityDestroyed(0)));
    }

    #[test]
    fn test_truck_fleet_adds_slots() {
        let mut state = command_state();
        state.economy.scrap = 50;
        state.purchase_global_upgrade(GlobalUpgrade::TruckFleet).unwrap();
        state.launchers[0].missiles = 0;
        dispatch_truck(&mut state, 0, None).unwrap();
        dispatch_truck(&mut state, 0, None).unwrap();
        assert_eq!(busy_trucks(&state, 0), 2);
    }

    #[test]
    fn test_auto_dispatch_covers_demand_once() {
        let mut state = command_state();
        state.cities[0].ammo_stockpile = 5;
        state.economy.scrap = 50;
        state.purchase_global_upgrade(GlobalUpgrade::TruckFleet).unwrap();
        state.launchers[2].missiles = 8;

        auto_dispatch(&mut state);
        // One load covers the gap, so only one truck goes out
        assert_eq!(state.trucks.len(), 1);
        assert_eq!(state.trucks[0].launcher, 2);
        assert_eq!(state.cities[0].ammo_stockpile, 4);

        for _ in 0..1000 {
            update(&mut state, FRAME_MS);
        }
        assert_eq!(state.launchers[2].missiles, 10);
        assert!(state.launchers.iter().all(|l| l.missiles <= l.max_missiles));
    }
}
