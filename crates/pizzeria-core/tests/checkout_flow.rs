//! A whole sale driven through the session, from menu to ticket.

use std::time::Duration;

use chrono::{TimeZone, Utc};
use pizzeria_core::{
    group, Catalog, Effect, Event, FixedClock, Money, PizzaSize, SequentialIds, Session,
    SessionTimings, View, ViewKind,
};

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

fn register() -> Session {
    let clock = FixedClock(Utc.with_ymd_and_hms(2026, 10, 18, 21, 15, 0).unwrap());
    Session::with_parts(
        Catalog::default(),
        SessionTimings::default(),
        Box::new(clock),
        Box::new(SequentialIds::new()),
    )
}

#[test]
fn test_two_pizza_sale_end_to_end() {
    let mut s = register();

    // Ham Pizza, large, extra pepperoni: 12 + 3 + 2
    s.dispatch(ms(0), Event::SelectPizza(2));
    s.dispatch(ms(100), Event::ChooseSize(PizzaSize::L));
    s.dispatch(ms(200), Event::ToggleTopping(2));
    s.dispatch(ms(300), Event::AddToCart);
    assert_eq!(s.cart().items()[0].total_price, Money::from_major(17));

    s.advance(ms(1800));
    assert_eq!(s.view(), &View::Ordering);

    // New Orleans, small: 15 - 2
    s.dispatch(ms(2000), Event::SelectPizza(1));
    s.dispatch(ms(2100), Event::ChooseSize(PizzaSize::S));
    s.dispatch(ms(2200), Event::AddToCart);
    s.advance(ms(3700));

    assert_eq!(s.cart_count(), 2);
    assert_eq!(s.cart().total(), Money::from_major(30));

    s.dispatch(ms(4000), Event::OpenCart);
    s.dispatch(ms(4100), Event::Checkout);
    assert_eq!(s.view().kind(), ViewKind::Payment);
    assert_eq!(s.suggestions(), vec![Money::from_major(30)]);

    s.dispatch(ms(4200), Event::Digit('3'));
    s.dispatch(ms(4300), Event::Digit('0'));
    let eval = s.payment_evaluation().unwrap();
    assert!(eval.can_charge);
    assert_eq!(eval.change, Money::zero());

    s.dispatch(ms(4400), Event::Charge);
    let tx = s.view().transaction().cloned().unwrap();
    assert_eq!(tx.total, Money::from_major(30));
    assert_eq!(tx.amount_received, Money::from_major(30));
    assert_eq!(tx.change, Money::zero());
    assert_eq!(tx.ticket_number, 1);
    assert_eq!(tx.item_count(), 2);
    assert_eq!(tx.date, Utc.with_ymd_and_hms(2026, 10, 18, 21, 15, 0).unwrap());
    assert_eq!(s.cart_count(), 0);

    let summary = group(&tx);
    assert_eq!(summary.unique_groups, 2);
    assert!(summary.groups.iter().all(|g| g.quantity == 1));

    s.dispatch(ms(5000), Event::ShowTicket);
    s.dispatch(ms(5100), Event::Print);
    let shared = s.dispatch(ms(5150), Event::Share);
    assert_eq!(shared, vec![Effect::Share(tx.clone())]);
    assert_eq!(s.advance(ms(5200)), vec![Effect::Print(tx)]);

    s.dispatch(ms(6000), Event::CloseTicket);
    s.dispatch(ms(6100), Event::NewSale);
    assert_eq!(s.view(), &View::Ordering);
    assert_eq!(s.tickets_issued(), 1);
}

#[test]
fn test_change_for_overpayment_with_suggestion() {
    let mut s = register();

    s.dispatch(ms(0), Event::SelectPizza(4));
    s.dispatch(ms(0), Event::ToggleTopping(1));
    s.dispatch(ms(0), Event::ToggleTopping(5));
    s.dispatch(ms(0), Event::AddToCart);
    s.dispatch(ms(100), Event::OpenCart);
    s.dispatch(ms(100), Event::Checkout);

    // Pepperoni Classic M + Mushrooms + Bacon = $16.00
    assert_eq!(s.suggestions(), vec![Money::from_major(16)]);

    for key in "20".chars() {
        s.dispatch(ms(200), Event::Digit(key));
    }
    assert_eq!(
        s.payment_evaluation().and_then(|e| e.change_due()),
        Some(Money::from_major(4))
    );

    s.dispatch(ms(300), Event::Charge);
    let tx = s.view().transaction().unwrap();
    assert_eq!(tx.change, Money::from_major(4));
}
