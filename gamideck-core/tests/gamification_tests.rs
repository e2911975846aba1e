use gamideck_core::{
    points, AudioSettings, CoreError, DailySpin, Leaderboard, Rating, ReminderFrequency,
    ReminderSettings, StudyContext, Trend, MAX_REMINDER_DAYS, REWARDS,
};
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn spin_picks_from_wheel_once() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut spin = DailySpin::new();
    assert_eq!(spin.multiplier(), 1.0);

    let res = spin.spin(&mut rng).unwrap();
    assert!(res.segment < REWARDS.len());
    assert_eq!(res.reward, REWARDS[res.segment]);
    assert_eq!(res.rotation_degrees, 1800.0 + res.segment as f32 * 45.0);
    assert!(spin.has_spun());
    assert_eq!(spin.multiplier(), res.reward);

    let again = spin.spin(&mut rng).unwrap_err();
    assert_eq!(again, CoreError::AlreadySpun { reward: res.reward });
    assert_eq!(spin.result(), Some(res));

    spin.reset();
    assert!(!spin.has_spun());
    assert!(spin.spin(&mut rng).is_ok());
}

#[test]
fn spin_reaches_every_segment() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut seen = [false; REWARDS.len()];
    for _ in 0..500 {
        let mut spin = DailySpin::new();
        seen[spin.spin(&mut rng).unwrap().segment] = true;
    }
    assert!(seen.iter().all(|s| *s));
}

#[test]
fn award_scales_with_multiplier() {
    assert_eq!(points::award(Rating::Again, 3.0), 0);
    assert_eq!(points::award(Rating::Hard, 1.0), 2);
    assert_eq!(points::award(Rating::Good, 1.5), 15);
    assert_eq!(points::award(Rating::Easy, 2.5), 38);
    // below-one multipliers never shrink the base
    assert_eq!(points::award(Rating::Good, 0.5), 10);
    assert_eq!(points::award(Rating::Good, f32::NAN), 10);
}

#[test]
fn leaderboard_starts_sorted_with_you_second() {
    let lb = Leaderboard::mock();
    assert_eq!(lb.friends().len(), 10);
    assert!(lb.friends().windows(2).all(|w| w[0].points >= w[1].points));
    assert_eq!(lb.rank_of_you(), Some(2));
    assert_eq!(lb.you().unwrap().name, "Georgia");
    assert!(!lb.show_rank_up_badge());
}

#[test]
fn add_points_resorts_and_raises_badge() {
    let mut lb = Leaderboard::mock();

    assert_eq!(lb.add_points(10), Some(2));
    assert!(!lb.show_rank_up_badge());
    assert_eq!(lb.you().unwrap().trend, Trend::Up);

    // 866 + 57 = 923 > Alice's 922
    assert_eq!(lb.add_points(57), Some(1));
    assert!(lb.show_rank_up_badge());
    assert_eq!(lb.friends()[0].name, "Georgia");
    assert!(lb.friends().windows(2).all(|w| w[0].points >= w[1].points));

    lb.set_show_rank_up_badge(false);
    assert!(!lb.show_rank_up_badge());

    lb.reset();
    assert_eq!(lb.rank_of_you(), Some(2));
    assert_eq!(lb.you().unwrap().points, 856);
}

#[test]
fn tie_keeps_previous_order() {
    let mut lb = Leaderboard::mock();
    // 856 + 66 = 922, ties Alice who stays first
    assert_eq!(lb.add_points(66), Some(2));
    assert!(!lb.show_rank_up_badge());
}

#[test]
fn context_credits_with_spin_multiplier() {
    let mut ctx = StudyContext::new(AudioSettings::default());
    let mut rng = StdRng::seed_from_u64(1);
    let reward = ctx.spin.spin(&mut rng).unwrap().reward;

    let c = ctx.credit(Rating::Good);
    assert_eq!(c.points, points::award(Rating::Good, reward));
    assert_eq!(ctx.earned(), c.points);
    assert_eq!(ctx.leaderboard.you().unwrap().points, 856 + c.points);

    let none = ctx.credit(Rating::Again);
    assert_eq!(none.points, 0);
    assert!(!none.rank_up);
}

#[test]
fn context_reports_rank_up_once() {
    let mut ctx = StudyContext::default();
    let mut rank_ups = 0;
    for _ in 0..10 {
        if ctx.credit(Rating::Easy).rank_up {
            rank_ups += 1;
        }
    }
    // 856 + 10 * 15 = 1006
    assert_eq!(rank_ups, 1);
    assert_eq!(ctx.leaderboard.rank_of_you(), Some(1));

    ctx.reset();
    assert_eq!(ctx.earned(), 0);
    assert_eq!(ctx.leaderboard.rank_of_you(), Some(2));
}

#[test]
fn audio_toggle() {
    let mut a = AudioSettings::default();
    assert!(a.should_play());
    assert!(a.toggle_mute());
    assert!(!a.should_play());
    a.set_muted(false);
    assert!(a.should_play());
}

#[test]
fn reminder_frequency_parsing() {
    assert_eq!("1".parse::<ReminderFrequency>().unwrap(), ReminderFrequency::Daily);
    assert_eq!("5".parse::<ReminderFrequency>().unwrap(), ReminderFrequency::EveryDays(5));
    assert_eq!("weekly".parse::<ReminderFrequency>().unwrap(), ReminderFrequency::EveryDays(7));
    assert_eq!("custom:10".parse::<ReminderFrequency>().unwrap(), ReminderFrequency::EveryDays(10));
    assert!(matches!("custom:0".parse::<ReminderFrequency>(), Err(CoreError::Invalid(_))));
    assert!(matches!("4".parse::<ReminderFrequency>(), Err(CoreError::Invalid(_))));
    assert_eq!(ReminderFrequency::EveryDays(7).to_string(), "weekly");
}

#[test]
fn next_reminder_respects_vacation_and_deadline() {
    let day = |d| NaiveDate::from_ymd_opt(2026, 3, d).unwrap();
    let mut s = ReminderSettings {
        enabled: true,
        vacation: false,
        deadline: Some(day(10)),
        frequency: ReminderFrequency::EveryDays(3),
    };
    assert_eq!(s.next_reminder(day(1)), Some(day(4)));
    assert_eq!(s.next_reminder(day(7)), Some(day(10)));
    assert_eq!(s.next_reminder(day(8)), None);

    s.vacation = true;
    assert_eq!(s.next_reminder(day(1)), None);

    assert_eq!(ReminderSettings::default().next_reminder(day(1)), None);
}

#[test]
fn custom_frequency_is_bounded() {
    assert_eq!(
        "custom:3650".parse::<ReminderFrequency>().unwrap(),
        ReminderFrequency::EveryDays(MAX_REMINDER_DAYS)
    );
    assert!(matches!("custom:3651".parse::<ReminderFrequency>(), Err(CoreError::Invalid(_))));
    assert!(matches!("custom:4000000000".parse::<ReminderFrequency>(), Err(CoreError::Invalid(_))));
    assert!(matches!(ReminderFrequency::custom(u32::MAX), Err(CoreError::Invalid(_))));
}

#[test]
fn next_reminder_past_calendar_end_is_none() {
    let on = |frequency| ReminderSettings { enabled: true, vacation: false, deadline: None, frequency };
    assert_eq!(on(ReminderFrequency::Daily).next_reminder(NaiveDate::MAX), None);

    // a stored library may still carry an oversized gap
    let huge = on(ReminderFrequency::EveryDays(4_000_000_000));
    let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
    assert_eq!(huge.next_reminder(today), None);
    assert_eq!(
        on(ReminderFrequency::EveryDays(MAX_REMINDER_DAYS)).next_reminder(today),
        today.checked_add_days(chrono::Days::new(3650))
    );
}
